//! MediaConvert client - job submission and status lookups
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
use resizer_config::TranscodeConfig;
use resizer_types::{JobRecord, JobSpec, ResizerError, Result, H264_CBR_PROFILE};
use rusoto_core::{request::HttpClient, Client, Region};
use rusoto_credential::DefaultCredentialsProvider;
use rusoto_mediaconvert::{
    ContainerSettings, CreateJobRequest, DescribeEndpointsRequest, FileGroupSettings,
    GetJobRequest, H264Settings, Input, Job, JobSettings, MediaConvert, MediaConvertClient,
    Output, OutputGroup, OutputGroupSettings, VideoCodecSettings, VideoDescription,
};
use std::str::FromStr;
use tracing::{debug, info};

use crate::services::TranscodeService;

const FILE_GROUP_SETTINGS: &str = "FILE_GROUP_SETTINGS";

/// MediaConvert-backed transcode service
///
/// MediaConvert requires requests to go to an account-specific endpoint.
/// Unless one is configured it is discovered before every call. The
/// signing client (HTTP connector + credentials cache) is built once and
/// shared by every per-endpoint client.
pub struct MediaConvertService {
    client: Client,
    region: Region,
    role_arn: String,
    endpoint: Option<String>,
}

impl MediaConvertService {
    /// Create a new MediaConvert service using the default credential chain
    pub fn new(region: &str, config: TranscodeConfig) -> Result<Self> {
        let region = Region::from_str(region)
            .map_err(|e| ResizerError::Config(format!("Invalid region {}: {}", region, e)))?;
        let client = Self::create_client()?;

        Ok(Self::with_client(client, region, config))
    }

    /// Create a service around an existing signing client
    pub fn with_client(client: Client, region: Region, config: TranscodeConfig) -> Self {
        info!(
            region = region.name(),
            endpoint = ?config.endpoint,
            "Initializing MediaConvert client"
        );

        Self {
            client,
            region,
            role_arn: config.role_arn,
            endpoint: config.endpoint,
        }
    }

    fn create_client() -> Result<Client> {
        let http_client = HttpClient::new()
            .map_err(|e| ResizerError::Transcode(format!("Failed to create HTTP client: {}", e)))?;
        let credentials = DefaultCredentialsProvider::new()
            .map_err(|e| ResizerError::Transcode(format!("Failed to create credentials provider: {}", e)))?;

        Ok(Client::new_with(credentials, http_client))
    }

    fn client_for(&self, region: Region) -> MediaConvertClient {
        MediaConvertClient::new_with_client(self.client.clone(), region)
    }

    /// Region pointing at the account endpoint
    async fn endpoint_region(&self) -> Result<Region> {
        let endpoint = match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => self.discover_endpoint().await?,
        };

        Ok(Region::Custom {
            name: self.region.name().to_string(),
            endpoint,
        })
    }

    /// Client bound to the account endpoint
    async fn endpoint_client(&self) -> Result<MediaConvertClient> {
        Ok(self.client_for(self.endpoint_region().await?))
    }

    async fn discover_endpoint(&self) -> Result<String> {
        let client = self.client_for(self.region.clone());

        let response = client
            .describe_endpoints(DescribeEndpointsRequest::default())
            .await
            .map_err(|e| ResizerError::Transcode(format!("Failed to describe endpoints: {}", e)))?;

        let url = response
            .endpoints
            .unwrap_or_default()
            .into_iter()
            .find_map(|endpoint| endpoint.url)
            .ok_or_else(|| ResizerError::Transcode("No MediaConvert endpoint returned".to_string()))?;

        debug!(endpoint = url, "Discovered MediaConvert endpoint");
        Ok(url)
    }
}

#[async_trait]
impl TranscodeService for MediaConvertService {
    async fn create_job(&self, spec: &JobSpec) -> Result<String> {
        let client = self.endpoint_client().await?;

        let request = CreateJobRequest {
            role: self.role_arn.clone(),
            settings: job_settings(spec),
            ..Default::default()
        };

        info!(
            input = spec.input_file,
            destination = spec.destination,
            width = spec.width,
            height = spec.height,
            "Submitting MediaConvert job"
        );

        let response = client
            .create_job(request)
            .await
            .map_err(|e| ResizerError::Transcode(format!("Failed to create job: {}", e)))?;

        response
            .job
            .and_then(|job| job.id)
            .ok_or_else(|| ResizerError::Transcode("Created job has no identifier".to_string()))
    }

    async fn get_job(&self, job_id: &str) -> Result<JobRecord> {
        let client = self.endpoint_client().await?;

        let response = client
            .get_job(GetJobRequest {
                id: job_id.to_string(),
            })
            .await
            .map_err(|e| ResizerError::Transcode(format!("Failed to get job {}: {}", job_id, e)))?;

        let job = response
            .job
            .ok_or_else(|| ResizerError::Transcode(format!("Job {} not returned", job_id)))?;

        Ok(job_record(job_id, job))
    }
}

/// Single file output group with the fixed H.264 profile
fn job_settings(spec: &JobSpec) -> JobSettings {
    let profile = &H264_CBR_PROFILE;

    let output = Output {
        container_settings: Some(ContainerSettings {
            container: Some(profile.container.to_string()),
            ..Default::default()
        }),
        video_description: Some(VideoDescription {
            width: Some(i64::from(spec.width)),
            height: Some(i64::from(spec.height)),
            codec_settings: Some(VideoCodecSettings {
                codec: Some(profile.codec.to_string()),
                h264_settings: Some(H264Settings {
                    bitrate: Some(profile.bitrate),
                    rate_control_mode: Some(profile.rate_control_mode.to_string()),
                    gop_size: Some(profile.gop_size),
                    interlace_mode: Some(profile.interlace_mode.to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    };

    JobSettings {
        inputs: Some(vec![Input {
            file_input: Some(spec.input_file.clone()),
            ..Default::default()
        }]),
        output_groups: Some(vec![OutputGroup {
            output_group_settings: Some(OutputGroupSettings {
                type_: Some(FILE_GROUP_SETTINGS.to_string()),
                file_group_settings: Some(FileGroupSettings {
                    destination: Some(spec.destination.clone()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            outputs: Some(vec![output]),
            ..Default::default()
        }]),
        ..Default::default()
    }
}

fn job_record(job_id: &str, job: Job) -> JobRecord {
    let destinations = job
        .settings
        .output_groups
        .unwrap_or_default()
        .into_iter()
        .filter_map(|group| {
            group
                .output_group_settings
                .and_then(|settings| settings.file_group_settings)
                .and_then(|file_group| file_group.destination)
        })
        .collect();

    JobRecord {
        id: job.id.unwrap_or_else(|| job_id.to_string()),
        status: job.status.unwrap_or_default(),
        destinations,
    }
}
