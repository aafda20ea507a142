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

use tracing::debug;

use super::{parse_entry_name, to_snake_case, MetricBuilder, MetricExporter};
use crate::record::Record;
use crate::registry::RegisterSpace;

pub const REG_STATE_METRIC_PREFIX: &str = "amdgpu_reg_state";

pub struct RegStateExporter<'a> {
    pub card: u32,
    pub space: RegisterSpace,
    pub record: &'a Record,
}

impl<'a> RegStateExporter<'a> {
    pub fn new(card: u32, space: RegisterSpace, record: &'a Record) -> Self {
        Self {
            card,
            space,
            record,
        }
    }
}

impl MetricExporter for RegStateExporter<'_> {
    fn export_into(&self, builder: &mut MetricBuilder) {
        let card = self.card.to_string();

        for entry in self.record {
            let Some(labels) = parse_entry_name(&entry.name) else {
                debug!("skipping unexpected register entry name {}", entry.name);
                continue;
            };
            if labels.field == "pad" {
                continue;
            }

            let name = format!("{REG_STATE_METRIC_PREFIX}_{}", to_snake_case(labels.field));
            let mut label_set = vec![("card", card.as_str()), ("space", self.space.as_str())];
            if let Some(instance) = labels.instance {
                label_set.push(("instance", instance));
            }
            if let Some(smn) = labels.smn {
                label_set.push(("smn", smn));
            }
            if let Some(index) = labels.index {
                label_set.push(("index", index));
            }

            builder
                .help(&name, &format!("Register state field {}", labels.field))
                .type_(&name, "gauge")
                .metric(&name, &label_set, entry.value);
        }
    }
}
