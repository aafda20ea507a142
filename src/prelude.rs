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

//! The amdgpu-tables prelude.
//!
//! ```rust
//! use amdgpu_tables::prelude::*;
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use amdgpu_tables::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let record = present_reg_state("/sys/class/drm/card0/device/reg_state", RegisterSpace::Xgmi)?;
//!     for entry in &record {
//!         println!("{} {}", entry.name, entry.value);
//!     }
//!     Ok(())
//! }
//! ```

// Decoding
pub use crate::decoder::{decode_flat, decode_nested};
pub use crate::registry::{
    decode_pm_metrics, decode_reg_state, select_pm_schema, select_register_schema, RegisterSpace,
};

// Sysfs access
pub use crate::present::{present_pm_metrics, present_reg_state};
pub use crate::source::{discover_cards, pm_metrics_path, reg_state_path};

// Data types
pub use crate::error::{DecodeError, Error, Result};
pub use crate::record::{Entry, Record};
pub use crate::schema::{FieldDescriptor, FieldFlag, FieldType, Schema};
