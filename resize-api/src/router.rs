//! Request Router - maps inbound requests onto the three broker operations
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


use resizer_config::StorageConfig;
use resizer_types::{
    download_key_from_destination, JobCreatedResponse, JobRequest, JobStatus, ResizerError,
    Result, UploadUrlResponse,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, info_span, warn, Instrument, Span};
use uuid::Uuid;

use crate::request::{ApiResponse, InboundRequest};
use crate::services::{TranscodeService, UrlSigner};

/// What an inbound request asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// `GET ?jobId=...`
    JobStatus(String),
    /// `GET` without a job id
    UploadUrl,
    /// `POST` with a job body
    SubmitJob,
    /// CORS preflight
    Preflight,
    Unsupported,
}

impl Intent {
    pub fn of(request: &InboundRequest) -> Self {
        match request.method.to_ascii_uppercase().as_str() {
            "GET" => match request.query_param("jobId") {
                Some(job_id) => Intent::JobStatus(job_id.to_string()),
                None => Intent::UploadUrl,
            },
            "POST" => Intent::SubmitJob,
            "OPTIONS" => Intent::Preflight,
            _ => Intent::Unsupported,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Intent::JobStatus(_) => "job_status",
            Intent::UploadUrl => "upload_url",
            Intent::SubmitJob => "submit_job",
            Intent::Preflight => "preflight",
            Intent::Unsupported => "unsupported",
        }
    }
}

/// Stateless dispatcher shared by every request
#[derive(Clone)]
pub struct RequestRouter {
    transcoder: Arc<dyn TranscodeService>,
    signer: Arc<dyn UrlSigner>,
    input_bucket: String,
    output_bucket: String,
    expires_in: Duration,
    parent_span: Span,
}

impl RequestRouter {
    /// Create a new request router
    pub fn new(
        transcoder: Arc<dyn TranscodeService>,
        signer: Arc<dyn UrlSigner>,
        storage: StorageConfig,
    ) -> Self {
        let expires_in = storage.presign_expiry();
        Self {
            transcoder,
            signer,
            input_bucket: storage.input_bucket,
            output_bucket: storage.output_bucket,
            expires_in,
            parent_span: Span::none(),
        }
    }

    /// Nest every request span under `span` (normally the service root span)
    pub fn with_parent_span(mut self, span: Span) -> Self {
        self.parent_span = span;
        self
    }

    /// Handle one request; never fails, errors become error responses
    pub async fn dispatch(&self, request: &InboundRequest) -> ApiResponse {
        let intent = Intent::of(request);
        let span = info_span!(
            parent: &self.parent_span,
            "dispatch",
            request_id = %Uuid::new_v4(),
            method = %request.method,
            intent = intent.name(),
        );

        async move {
            let outcome = match intent {
                Intent::JobStatus(job_id) => self
                    .job_status(&job_id)
                    .await
                    .map(|status| ApiResponse::json(200, &status)),
                Intent::UploadUrl => self
                    .upload_url(request)
                    .await
                    .map(|url| ApiResponse::json(200, &url).allowing_put()),
                Intent::SubmitJob => self
                    .submit_job(request)
                    .await
                    .map(|created| ApiResponse::json(200, &created)),
                Intent::Preflight => Ok(ApiResponse::json(200, &serde_json::json!({})).allowing_put()),
                Intent::Unsupported => {
                    warn!("Unsupported method");
                    Ok(ApiResponse::error(405, "Method not allowed"))
                }
            };

            match outcome {
                Ok(response) => {
                    info!(status = response.status_code, "Request handled");
                    response
                }
                Err(e) if e.is_client_error() => {
                    warn!(error = %e, "Rejected request");
                    ApiResponse::error(400, e.to_string())
                }
                Err(e) => {
                    error!(error = %e, "Request failed");
                    ApiResponse::error(500, e.to_string())
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Presigned PUT URL for `key` in the input bucket
    async fn upload_url(&self, request: &InboundRequest) -> Result<UploadUrlResponse> {
        let key = request
            .query_param("key")
            .ok_or_else(|| ResizerError::MissingField("Missing key parameter".to_string()))?;

        info!(bucket = self.input_bucket, key = key, "Generating upload URL");

        let url = self
            .signer
            .presign_put(&self.input_bucket, key, self.expires_in)
            .await?;

        Ok(UploadUrlResponse { url })
    }

    /// Validate the body and submit a transcode job
    async fn submit_job(&self, request: &InboundRequest) -> Result<JobCreatedResponse> {
        let body = request
            .body()
            .ok_or_else(|| ResizerError::MissingField("Missing body in the event".to_string()))?;

        let spec = JobRequest::from_body(body)?.into_spec()?;
        let job_id = self.transcoder.create_job(&spec).await?;

        info!(job_id = job_id, "Transcode job created");
        Ok(JobCreatedResponse::new(job_id))
    }

    /// Job status, plus a download URL once the job is complete
    async fn job_status(&self, job_id: &str) -> Result<JobStatus> {
        info!(job_id = job_id, "Checking job status");

        let job = self.transcoder.get_job(job_id).await?;
        if !job.is_complete() {
            return Ok(JobStatus {
                status: job.status,
                download_url: None,
            });
        }

        // Multi-output jobs: only the first group's destination is served.
        let destination = job.destinations.first().ok_or_else(|| {
            ResizerError::Transcode(format!("Job {} has no file output destination", job.id))
        })?;
        let key = download_key_from_destination(destination);

        let url = self
            .signer
            .presign_get(&self.output_bucket, &key, self.expires_in)
            .await?;

        Ok(JobStatus {
            status: job.status,
            download_url: Some(url),
        })
    }
}
