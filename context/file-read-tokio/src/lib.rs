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

//! Tokio-based file reading implementation for ucare.
//!
//! This crate provides `TokioFileRead`, an async file reader that implements
//! the `FileRead` trait from `ucare_core` using Tokio's file system operations.
//!
//! ## Example
//!
//! ```no_run
//! use ucare_core::Context;
//! use ucare_file_read_tokio::TokioFileRead;
//!
//! #[tokio::main]
//! async fn main() {
//!     let ctx = Context::new().with_file_read(TokioFileRead);
//!
//!     // Local uploads decide between "file" and "url" with this check.
//!     if ctx.file_exists("photo.jpg").await.unwrap_or(false) {
//!         let content = ctx.file_read("photo.jpg").await.unwrap();
//!         println!("Read {} bytes", content.len());
//!     }
//! }
//! ```

use async_trait::async_trait;
use ucare_core::{Error, FileRead, Result};

/// Tokio-based implementation of the `FileRead` trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileRead;

#[async_trait]
impl FileRead for TokioFileRead {
    async fn file_read(&self, path: &str) -> Result<Vec<u8>> {
        tokio::fs::read(path)
            .await
            .map_err(|e| Error::unexpected(format!("failed to read file {path}")).with_source(e))
    }

    async fn file_exists(&self, path: &str) -> Result<bool> {
        // Any path the OS refuses to stat (missing, too long, not a directory
        // along the way) is not a readable file.
        Ok(tokio::fs::metadata(path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false))
    }
}
