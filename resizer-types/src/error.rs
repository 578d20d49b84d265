//! Error types for Resizer
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


use thiserror::Error;

/// Errors that can occur while brokering a request
#[derive(Error, Debug)]
pub enum ResizerError {
    #[error("Invalid request body: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    MissingField(String),

    #[error("{0}")]
    Validation(String),

    #[error("Transcode service error: {0}")]
    Transcode(String),

    #[error("Object storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ResizerError {
    /// Whether the caller caused this error (400) rather than the service (500)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ResizerError::Serialization(_)
                | ResizerError::MissingField(_)
                | ResizerError::Validation(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ResizerError>;
