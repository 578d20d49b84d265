//! In-memory stand-ins for the managed services

#![allow(dead_code)]

use async_trait::async_trait;
use resize_api::{RequestRouter, TranscodeService, UrlSigner};
use resizer_config::StorageConfig;
use resizer_types::{JobRecord, JobSpec, ResizerError, Result};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const INPUT_BUCKET: &str = "uploads";
pub const OUTPUT_BUCKET: &str = "resized";

/// Records submissions and replays a canned job record
#[derive(Default)]
pub struct FakeTranscoder {
    pub submitted: Mutex<Vec<JobSpec>>,
    pub job: Mutex<Option<JobRecord>>,
    pub fail_with: Mutex<Option<String>>,
}

impl FakeTranscoder {
    pub fn with_job(status: &str, destinations: &[&str]) -> Self {
        let fake = Self::default();
        *fake.job.lock().unwrap() = Some(JobRecord {
            id: "1700000000-abc123".to_string(),
            status: status.to_string(),
            destinations: destinations.iter().map(|d| d.to_string()).collect(),
        });
        fake
    }

    pub fn failing(message: &str) -> Self {
        let fake = Self::default();
        *fake.fail_with.lock().unwrap() = Some(message.to_string());
        fake
    }

    fn check_failure(&self) -> Result<()> {
        match self.fail_with.lock().unwrap().clone() {
            Some(message) => Err(ResizerError::Transcode(message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TranscodeService for FakeTranscoder {
    async fn create_job(&self, spec: &JobSpec) -> Result<String> {
        self.check_failure()?;
        self.submitted.lock().unwrap().push(spec.clone());
        Ok("1700000000-abc123".to_string())
    }

    async fn get_job(&self, job_id: &str) -> Result<JobRecord> {
        self.check_failure()?;
        self.job
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ResizerError::Transcode(format!("NotFoundException: job {}", job_id)))
    }
}

/// Produces recognizable fake URLs
#[derive(Default)]
pub struct FakeSigner {
    pub fail: bool,
}

#[async_trait]
impl UrlSigner for FakeSigner {
    async fn presign_put(&self, bucket: &str, key: &str, expires_in: Duration) -> Result<String> {
        if self.fail {
            return Err(ResizerError::Storage("Unable to locate credentials".to_string()));
        }
        Ok(format!("https://signed.test/put/{}/{}?expires={}", bucket, key, expires_in.as_secs()))
    }

    async fn presign_get(&self, bucket: &str, key: &str, expires_in: Duration) -> Result<String> {
        if self.fail {
            return Err(ResizerError::Storage("Unable to locate credentials".to_string()));
        }
        Ok(format!("https://signed.test/get/{}/{}?expires={}", bucket, key, expires_in.as_secs()))
    }
}

pub fn storage_config() -> StorageConfig {
    StorageConfig {
        input_bucket: INPUT_BUCKET.to_string(),
        output_bucket: OUTPUT_BUCKET.to_string(),
        presign_expiry_secs: 3600,
    }
}

pub fn router_with(transcoder: Arc<FakeTranscoder>, signer: FakeSigner) -> RequestRouter {
    RequestRouter::new(transcoder, Arc::new(signer), storage_config())
}
