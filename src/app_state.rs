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

use std::path::Path;

use tracing::warn;

use crate::present::{present_pm_table, present_reg_state};
use crate::record::Record;
use crate::registry::RegisterSpace;
use crate::schema::Schema;
use crate::source::{pm_metrics_path, reg_state_path};

/// A decoded table together with the layout it was decoded with.
#[derive(Debug, Clone)]
pub struct DecodedTable {
    pub schema: &'static Schema,
    pub record: Record,
}

/// Everything decoded from one card during a refresh.
#[derive(Debug, Clone)]
pub struct CardSnapshot {
    pub card: u32,
    pub pm_metrics: Option<DecodedTable>,
    pub reg_state: Vec<(RegisterSpace, DecodedTable)>,
    /// Tables that could not be read or decoded this sample.
    pub failed: Vec<String>,
}

impl CardSnapshot {
    /// Reads and decodes every table of `card`. Failures are logged and
    /// recorded; they never abort the snapshot.
    pub fn collect(drm_root: &Path, card: u32) -> Self {
        let mut snapshot = Self {
            card,
            pm_metrics: None,
            reg_state: Vec::new(),
            failed: Vec::new(),
        };

        match present_pm_table(pm_metrics_path(drm_root, card)) {
            Ok((schema, record)) => {
                snapshot.pm_metrics = Some(DecodedTable { schema, record });
            }
            Err(e) => {
                warn!("card{card}: no PM metrics this sample: {e}");
                snapshot.failed.push("pm_metrics".to_string());
            }
        }

        let reg_path = reg_state_path(drm_root, card);
        if reg_path.exists() {
            for space in RegisterSpace::ALL {
                match present_reg_state(&reg_path, space) {
                    Ok(record) => snapshot.reg_state.push((
                        space,
                        DecodedTable {
                            schema: space.schema(),
                            record,
                        },
                    )),
                    Err(e) => {
                        warn!("card{card}: no {space} register state this sample: {e}");
                        snapshot.failed.push(format!("reg_state.{space}"));
                    }
                }
            }
        }

        snapshot
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub cards: Vec<CardSnapshot>,
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            loading: true,
        }
    }
}
