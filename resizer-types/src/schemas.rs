//! Request and response payload schemas
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


use serde::{Deserialize, Serialize};

use crate::error::{ResizerError, Result};
use crate::keys::{s3_uri, strip_output_extension};

// ============================================================================
// Transcode Profile
// ============================================================================

/// Output width used when the request does not carry one
pub const DEFAULT_WIDTH: u32 = 1280;
/// Output height used when the request does not carry one
pub const DEFAULT_HEIGHT: u32 = 720;

/// Fixed encoding profile applied to every submitted job
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscodeProfile {
    pub container: &'static str,
    pub codec: &'static str,
    pub bitrate: i64,
    pub rate_control_mode: &'static str,
    pub gop_size: f64,
    pub interlace_mode: &'static str,
}

/// H.264 / MP4, 5 Mbps constant bitrate, 60-frame GOP, progressive
pub const H264_CBR_PROFILE: TranscodeProfile = TranscodeProfile {
    container: "MP4",
    codec: "H_264",
    bitrate: 5_000_000,
    rate_control_mode: "CBR",
    gop_size: 60.0,
    interlace_mode: "PROGRESSIVE",
};

/// Status value the transcode service reports for a finished job
pub const STATUS_COMPLETE: &str = "COMPLETE";

// ============================================================================
// Job Submission
// ============================================================================

/// Body of a job submission request
///
/// Every field is optional at the wire level so that presence can be
/// reported as a validation error instead of a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobRequest {
    #[serde(default)]
    pub bucket: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub output_bucket: Option<String>,
    #[serde(default)]
    pub output_key: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl JobRequest {
    /// Parse a raw request body
    pub fn from_body(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Validate required fields and resolve the job to submit
    pub fn into_spec(self) -> Result<JobSpec> {
        let (bucket, key, output_bucket, output_key) = match (
            non_empty(self.bucket),
            non_empty(self.key),
            non_empty(self.output_bucket),
            non_empty(self.output_key),
        ) {
            (Some(b), Some(k), Some(ob), Some(ok)) => (b, k, ob, ok),
            _ => {
                return Err(ResizerError::MissingField(
                    "Missing required parameters in the event body".to_string(),
                ))
            }
        };

        let output_key = strip_output_extension(&output_key);

        Ok(JobSpec {
            input_file: s3_uri(&bucket, &key),
            destination: s3_uri(&output_bucket, output_key),
            width: self.width.unwrap_or(DEFAULT_WIDTH),
            height: self.height.unwrap_or(DEFAULT_HEIGHT),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// A fully resolved transcode job, ready to hand to the service
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobSpec {
    /// `s3://bucket/key` of the source object
    pub input_file: String,
    /// `s3://bucket/prefix` the service writes into (extension added by the service)
    pub destination: String,
    pub width: u32,
    pub height: u32,
}

/// What the transcode service reports about an existing job
#[derive(Debug, Clone, PartialEq)]
pub struct JobRecord {
    pub id: String,
    pub status: String,
    /// File destinations of each output group, in submission order
    pub destinations: Vec<String>,
}

impl JobRecord {
    pub fn is_complete(&self) -> bool {
        self.status == STATUS_COMPLETE
    }
}

// ============================================================================
// Responses
// ============================================================================

/// `{status, downloadUrl?}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub download_url: Option<String>,
}

/// `{url}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadUrlResponse {
    pub url: String,
}

/// `{message, jobId}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCreatedResponse {
    pub message: String,
    pub job_id: String,
}

impl JobCreatedResponse {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            message: "MediaConvert job created successfully".to_string(),
            job_id: job_id.into(),
        }
    }
}

/// `{error}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
