//! Resize API Library
//!
//! Brokers access to a managed transcode service:
//! - Presigned upload URLs for source videos
//! - Transcode job submission with a fixed H.264 profile
//! - Job status polling with presigned download URLs on completion
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


pub mod mediaconvert;
pub mod request;
pub mod router;
pub mod server;
pub mod services;
pub mod storage;

// Re-export the router surface for convenience
pub use request::{ApiResponse, InboundRequest};
pub use router::{Intent, RequestRouter};
pub use services::{TranscodeService, UrlSigner};
