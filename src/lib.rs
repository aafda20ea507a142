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

//! Schema-driven decoding of the binary PM metrics and register-state
//! tables exposed by amdgpu devices under sysfs.

pub mod api;
pub mod app_state;
pub mod cli;
pub mod common;
pub mod decoder;
pub mod error;
pub mod output;
pub mod prelude;
pub mod present;
pub mod record;
pub mod registry;
pub mod schema;
pub mod source;

pub use decoder::{decode_flat, decode_nested};
pub use error::{DecodeError, Error, Result};
pub use present::{present_pm_metrics, present_reg_state};
pub use record::{Entry, Record};
pub use registry::{select_pm_schema, select_register_schema, RegisterSpace};
pub use schema::{FieldDescriptor, FieldFlag, FieldType, Schema};
