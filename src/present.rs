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

// Read a table node, pick its layout and decode it in one call.

use std::path::Path;

use tracing::debug;

use crate::common::config::AppConfig;
use crate::decoder::decode_flat;
use crate::error::Result;
use crate::record::Record;
use crate::registry::{decode_reg_state, select_pm_schema, RegisterSpace};
use crate::schema::Schema;
use crate::source::read_table_bytes;

/// Decodes the PM metrics table stored at `path`.
pub fn present_pm_metrics(path: impl AsRef<Path>) -> Result<Record> {
    present_pm_table(path).map(|(_, record)| record)
}

/// Like [`present_pm_metrics`], also returning the layout the header selected.
pub fn present_pm_table(path: impl AsRef<Path>) -> Result<(&'static Schema, Record)> {
    let path = path.as_ref();
    let buf = read_table_bytes(path, 0, AppConfig::PM_METRICS_MAX_BYTES)?;
    select_pm_schema(&buf)
        .and_then(|schema| decode_flat(&buf, schema).map(|record| (schema, record)))
        .map_err(|e| {
            debug!("failed to decode {}: {e}", path.display());
            e.into()
        })
}

/// Decodes one register space of the `reg_state` table stored at `path`.
pub fn present_reg_state(path: impl AsRef<Path>, space: RegisterSpace) -> Result<Record> {
    let path = path.as_ref();
    let buf = read_table_bytes(path, space.offset(), AppConfig::REG_STATE_MAX_BYTES)?;
    decode_reg_state(&buf, space).map_err(|e| {
        debug!("failed to decode {space} registers from {}: {e}", path.display());
        e.into()
    })
}
