//! Object Storage - presigned S3 URLs for uploads and downloads
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
use resizer_types::{ResizerError, Result};
use rusoto_core::Region;
use rusoto_credential::{AwsCredentials, DefaultCredentialsProvider, ProvideAwsCredentials};
use rusoto_s3::util::{PreSignedRequest, PreSignedRequestOption};
use rusoto_s3::{GetObjectRequest, PutObjectRequest};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::services::UrlSigner;

/// Signs S3 object URLs locally with credentials from the provider chain
pub struct S3UrlSigner<P = DefaultCredentialsProvider> {
    region: Region,
    credentials: P,
}

impl S3UrlSigner<DefaultCredentialsProvider> {
    /// Create a signer for `region` using the default credential chain
    /// (environment, profile, container or instance metadata).
    pub fn new(region: &str) -> Result<Self> {
        let region = Region::from_str(region)
            .map_err(|e| ResizerError::Config(format!("Invalid region {}: {}", region, e)))?;
        let credentials = DefaultCredentialsProvider::new()
            .map_err(|e| ResizerError::Storage(format!("Failed to create credentials provider: {}", e)))?;

        info!(region = region.name(), "Initializing S3 URL signer");

        Ok(Self { region, credentials })
    }
}

impl<P> S3UrlSigner<P>
where
    P: ProvideAwsCredentials + Send + Sync,
{
    /// Create a signer with an explicit region and credentials provider
    pub fn with_provider(region: Region, credentials: P) -> Self {
        Self { region, credentials }
    }

    async fn credentials(&self) -> Result<AwsCredentials> {
        self.credentials
            .credentials()
            .await
            .map_err(|e| ResizerError::Storage(format!("Failed to load AWS credentials: {}", e)))
    }
}

#[async_trait]
impl<P> UrlSigner for S3UrlSigner<P>
where
    P: ProvideAwsCredentials + Send + Sync,
{
    async fn presign_put(&self, bucket: &str, key: &str, expires_in: Duration) -> Result<String> {
        let credentials = self.credentials().await?;

        let request = PutObjectRequest {
            bucket: bucket.to_string(),
            key: key.to_string(),
            ..Default::default()
        };
        let url = request.get_presigned_url(
            &self.region,
            &credentials,
            &PreSignedRequestOption { expires_in },
        );

        debug!(bucket = bucket, key = key, "Signed upload URL");
        Ok(url)
    }

    async fn presign_get(&self, bucket: &str, key: &str, expires_in: Duration) -> Result<String> {
        let credentials = self.credentials().await?;

        let request = GetObjectRequest {
            bucket: bucket.to_string(),
            key: key.to_string(),
            ..Default::default()
        };
        let url = request.get_presigned_url(
            &self.region,
            &credentials,
            &PreSignedRequestOption { expires_in },
        );

        debug!(bucket = bucket, key = key, "Signed download URL");
        Ok(url)
    }
}
