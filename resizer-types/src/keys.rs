//! Object key helpers
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


/// Extension the transcode service appends to file outputs
pub const OUTPUT_EXTENSION: &str = ".mp4";

/// Build an `s3://bucket/key` URI
pub fn s3_uri(bucket: &str, key: &str) -> String {
    format!("s3://{}/{}", bucket, key)
}

/// Drop one trailing output extension; the service adds its own.
pub fn strip_output_extension(key: &str) -> &str {
    key.strip_suffix(OUTPUT_EXTENSION).unwrap_or(key)
}

/// Derive the object key of a finished output from its group destination.
///
/// Only the last path segment is kept (the bucket is configured
/// separately) and the output extension is appended when missing.
pub fn download_key_from_destination(destination: &str) -> String {
    let name = destination.rsplit('/').next().unwrap_or(destination);
    if name.ends_with(OUTPUT_EXTENSION) {
        name.to_string()
    } else {
        format!("{}{}", name, OUTPUT_EXTENSION)
    }
}
