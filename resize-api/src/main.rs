//! Resize API
//!
//! HTTP service that brokers a managed transcode service:
//! - Issues presigned upload URLs for the input bucket
//! - Submits MediaConvert jobs
//! - Reports job status and presigned download URLs
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


use anyhow::Result;
use resize_api::mediaconvert::MediaConvertService;
use resize_api::router::RequestRouter;
use resize_api::server::ApiServer;
use resize_api::storage::S3UrlSigner;
use resizer_config::AppConfig;
use resizer_logging::{init, LogFormat};
use std::sync::Arc;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    // Initialize logging
    let service_span = init(
        "resize-api",
        env!("CARGO_PKG_VERSION"),
        config.log_level(),
        LogFormat::from_name(config.log_format()),
    );

    info!(
        region = config.region,
        input_bucket = config.storage.input_bucket,
        output_bucket = config.storage.output_bucket,
        "Configuration loaded"
    );

    let transcoder = MediaConvertService::new(&config.region, config.transcode.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize MediaConvert client: {}", e))?;
    let signer = S3UrlSigner::new(&config.region)
        .map_err(|e| anyhow::anyhow!("Failed to initialize S3 URL signer: {}", e))?;

    let router = RequestRouter::new(
        Arc::new(transcoder),
        Arc::new(signer),
        config.storage.clone(),
    )
    .with_parent_span(service_span.clone());

    info!("Resize API running. Press Ctrl+C to stop.");
    ApiServer::new(config.http_port, router)
        .start()
        .instrument(service_span.clone())
        .await?;

    info!("Resize API stopped");
    Ok(())
}
