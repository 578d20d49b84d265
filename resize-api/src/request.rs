//! Inbound request and outbound response envelopes
//!
//! Both types also match the API Gateway proxy integration shape, so the
//! router can be fed from a proxy event as well as from the HTTP server.
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


use resizer_types::ErrorBody;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::error;

const ALLOW_METHODS: &str = "POST, GET, OPTIONS";
const ALLOW_METHODS_WITH_PUT: &str = "PUT, POST, GET, OPTIONS";

/// A request as seen by the router
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundRequest {
    #[serde(rename = "httpMethod")]
    pub method: String,
    #[serde(
        rename = "queryStringParameters",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub query: HashMap<String, String>,
    #[serde(default)]
    pub body: Option<String>,
}

impl InboundRequest {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            ..Default::default()
        }
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Query parameter value, treating an empty value as absent
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Request body, treating an empty body as absent
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref().filter(|b| !b.is_empty())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<HashMap<String, String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A response produced by the router
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ApiResponse {
    /// JSON response carrying the permissive CORS header set
    pub fn json<T: Serialize>(status_code: u16, payload: &T) -> Self {
        let body = match serde_json::to_string(payload) {
            Ok(body) => body,
            Err(e) => {
                error!(error = %e, "Failed to serialize response body");
                return Self::error(500, e.to_string());
            }
        };

        Self {
            status_code,
            headers: cors_headers(ALLOW_METHODS),
            body,
        }
    }

    /// `{"error": message}`
    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        let body = serde_json::json!({ "error": message.into() }).to_string();
        Self {
            status_code,
            headers: cors_headers(ALLOW_METHODS),
            body,
        }
    }

    /// Advertise PUT alongside the default methods (upload URLs are PUT targets)
    pub fn allowing_put(mut self) -> Self {
        self.headers.insert(
            "Access-Control-Allow-Methods".to_string(),
            ALLOW_METHODS_WITH_PUT.to_string(),
        );
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Decode the body, mostly useful to callers inspecting error payloads
    pub fn error_body(&self) -> Option<ErrorBody> {
        serde_json::from_str(&self.body).ok()
    }
}

fn cors_headers(methods: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        ("Access-Control-Allow-Methods".to_string(), methods.to_string()),
        ("Access-Control-Allow-Headers".to_string(), "Content-Type".to_string()),
    ])
}
