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
use crate::schema::{FieldFlag, Schema};

pub const PM_METRIC_PREFIX: &str = "amdgpu_pm";

pub struct PmMetricsExporter<'a> {
    pub card: u32,
    pub schema: &'static Schema,
    pub record: &'a Record,
}

impl<'a> PmMetricsExporter<'a> {
    pub fn new(card: u32, schema: &'static Schema, record: &'a Record) -> Self {
        Self {
            card,
            schema,
            record,
        }
    }
}

impl MetricExporter for PmMetricsExporter<'_> {
    fn export_into(&self, builder: &mut MetricBuilder) {
        let card = self.card.to_string();

        for entry in self.record {
            let Some(labels) = parse_entry_name(&entry.name) else {
                debug!("skipping unexpected PM entry name {}", entry.name);
                continue;
            };
            if labels.field == "pad" {
                continue;
            }

            let name = format!("{PM_METRIC_PREFIX}_{}", to_snake_case(labels.field));
            let metric_type = match self.schema.flag_of(labels.field) {
                Some(FieldFlag::Accumulator) => "counter",
                _ => "gauge",
            };

            let mut label_set = vec![("card", card.as_str())];
            if let Some(index) = labels.index {
                label_set.push(("index", index));
            }

            builder
                .help(&name, &format!("PM metrics field {}", labels.field))
                .type_(&name, metric_type)
                .metric(&name, &label_set, entry.value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode_flat;
    use crate::schema::pm_metrics::SMU_13_0_6_V8;

    fn decoded() -> Record {
        let mut buf = vec![0u8; SMU_13_0_6_V8.flat_size()];
        buf[12..16].copy_from_slice(&4u32.to_le_bytes());
        decode_flat(&buf, &SMU_13_0_6_V8).unwrap()
    }

    #[test]
    fn test_accumulators_are_counters() {
        let record = decoded();
        let text = PmMetricsExporter::new(1, &SMU_13_0_6_V8, &record).export_metrics();
        assert!(text.contains("# TYPE amdgpu_pm_socket_energy_acc counter\n"));
        assert!(text.contains("# TYPE amdgpu_pm_socket_power gauge\n"));
        assert!(text.contains("amdgpu_pm_pmmetrics_version{card=\"1\"} 4\n"));
    }

    #[test]
    fn test_array_slots_get_index_label() {
        let record = decoded();
        let text = PmMetricsExporter::new(0, &SMU_13_0_6_V8, &record).export_metrics();
        assert!(text.contains("amdgpu_pm_socclk_frequency{card=\"0\", index=\"3\"} 0\n"));
        assert_eq!(text.matches("# HELP amdgpu_pm_cclk_frequency_acc ").count(), 1);
        assert_eq!(text.matches("amdgpu_pm_cclk_frequency_acc{").count(), 96);
    }

    #[test]
    fn test_padding_is_not_exported() {
        let record = decoded();
        let text = PmMetricsExporter::new(0, &SMU_13_0_6_V8, &record).export_metrics();
        assert!(!text.contains("amdgpu_pm_pad"));
    }
}
