// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::time::Duration;

// Default locations.
pub const DEFAULT_UPLOAD_URL: &str = "https://upload.uploadcare.com";
pub const DEFAULT_CDN_URL: &str = "https://ucarecdn.com";

// Endpoints, relative to the upload url.
pub const ENDPOINT_BASE: &str = "/base/";
pub const ENDPOINT_FROM_URL: &str = "/from_url/";
pub const ENDPOINT_FROM_URL_STATUS: &str = "/from_url/status/";
pub const ENDPOINT_INFO: &str = "/info/";
pub const ENDPOINT_MULTIPART_START: &str = "/multipart/start/";
pub const ENDPOINT_MULTIPART_COMPLETE: &str = "/multipart/complete/";
pub const ENDPOINT_GROUP: &str = "/group/";
pub const ENDPOINT_GROUP_INFO: &str = "/group/info/";

// Form fields. The public key field name differs between endpoints.
pub const FIELD_UPLOADCARE_PUB_KEY: &str = "UPLOADCARE_PUB_KEY";
pub const FIELD_PUB_KEY: &str = "pub_key";
pub const FIELD_STORE: &str = "UPLOADCARE_STORE";
pub const FIELD_SOURCE_URL: &str = "source_url";
pub const FIELD_FILE: &str = "file";
pub const FIELD_FILE_ID: &str = "file_id";
pub const FIELD_GROUP_ID: &str = "group_id";
pub const FIELD_TOKEN: &str = "token";
pub const FIELD_FILENAME: &str = "filename";
pub const FIELD_SIZE: &str = "size";
pub const FIELD_CONTENT_TYPE: &str = "content_type";
pub const FIELD_UUID: &str = "uuid";
pub const FIELD_EXPIRE: &str = "expire";
pub const FIELD_SIGNATURE: &str = "signature";

// Response fields.
pub const RESPONSE_STATUS: &str = "status";
pub const RESPONSE_TOKEN: &str = "token";
pub const RESPONSE_FILE: &str = "file";
pub const RESPONSE_FILENAME: &str = "filename";
pub const RESPONSE_UUID: &str = "uuid";

// Fetch status values.
pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";
pub const STATUS_UNKNOWN: &str = "unknown";

/// Marker the service puts into the body when a signed request is required.
pub const MISSING_SIGNATURE_MARKER: &str = "`signature` is required";

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

// Env values used by `Config::from_env`.
pub const UPLOADCARE_PUBLIC_KEY: &str = "UPLOADCARE_PUBLIC_KEY";
pub const UPLOADCARE_SECRET_KEY: &str = "UPLOADCARE_SECRET_KEY";
pub const UPLOADCARE_UPLOAD_URL: &str = "UPLOADCARE_UPLOAD_URL";
