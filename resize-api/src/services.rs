//! Trait seams for the managed services the router talks to
// Copyright 2025 Francisco F. Pinochet
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


use async_trait::async_trait;
use resizer_types::{JobRecord, JobSpec, Result};
use std::time::Duration;

/// Managed transcode job service
#[async_trait]
pub trait TranscodeService: Send + Sync {
    /// Submit a job; returns the service-assigned job identifier
    async fn create_job(&self, spec: &JobSpec) -> Result<String>;

    /// Fetch the current state of a job
    async fn get_job(&self, job_id: &str) -> Result<JobRecord>;
}

/// Issues time-bounded URLs for single objects
#[async_trait]
pub trait UrlSigner: Send + Sync {
    /// URL allowing one PUT of `key` into `bucket`
    async fn presign_put(&self, bucket: &str, key: &str, expires_in: Duration) -> Result<String>;

    /// URL allowing GET of `key` from `bucket`
    async fn presign_get(&self, bucket: &str, key: &str, expires_in: Duration) -> Result<String>;
}
