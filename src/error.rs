// Copyright 2025 Lablup Inc. and Jeongkyu Shin
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

//! Error types for the amdgpu-tables library.
//!
//! Decoding failures are reported through [`DecodeError`]; everything that
//! involves touching the filesystem is wrapped in the crate-level [`enum@Error`].
//!
//! # Example
//!
//! ```rust,no_run
//! use amdgpu_tables::{present_pm_metrics, Result};
//!
//! fn main() -> Result<()> {
//!     let record = present_pm_metrics("/sys/class/drm/card0/device/pm_metrics")?;
//!     println!("{} fields", record.len());
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Errors produced while decoding a binary table.
///
/// All variants are terminal for the decode call that raised them. No
/// partially decoded record is ever returned alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The buffer ended before the schema was satisfied.
    ///
    /// `needed` is the cursor position the failing read would have reached,
    /// `available` the length of the buffer.
    #[error("buffer truncated while reading '{field}': need {needed} bytes, have {available}")]
    Truncated {
        field: &'static str,
        needed: usize,
        available: usize,
    },

    /// The PM metrics header carries a version no schema is registered for.
    #[error("PM metrics version {0} not supported")]
    UnsupportedVersion(u32),

    /// A register-space identifier outside the known set.
    #[error("invalid register space <{0}>")]
    UnknownSpace(u32),
}

/// The main error type for amdgpu-tables library operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The table was read but could not be decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The sysfs node for the requested table does not exist.
    #[error("Device table not found: {0}")]
    DeviceNotFound(String),

    /// An I/O error occurred while reading a table.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for amdgpu-tables operations.
pub type Result<T> = std::result::Result<T, Error>;
