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

pub mod pm_metrics;
pub mod reg_state;

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Trait for exporting metrics in Prometheus format
pub trait MetricExporter {
    /// Append this exporter's samples to `builder`.
    fn export_into(&self, builder: &mut MetricBuilder);

    /// Export metrics to Prometheus format string
    fn export_metrics(&self) -> String {
        let mut builder = MetricBuilder::new();
        self.export_into(&mut builder);
        builder.build()
    }
}

#[derive(Debug, Default)]
struct MetricFamily {
    name: String,
    help: Option<String>,
    metric_type: Option<String>,
    samples: Vec<String>,
}

/// Helper struct to build Prometheus metrics.
///
/// Samples are grouped per metric family, so HELP and TYPE are written once
/// and a family's samples stay contiguous even when they are added out of
/// order.
#[derive(Debug, Default)]
pub struct MetricBuilder {
    families: Vec<MetricFamily>,
    index: HashMap<String, usize>,
}

impl MetricBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn family(&mut self, name: &str) -> &mut MetricFamily {
        let next = self.families.len();
        let slot = *self.index.entry(name.to_string()).or_insert(next);
        if slot == next {
            self.families.push(MetricFamily {
                name: name.to_string(),
                ..Default::default()
            });
        }
        &mut self.families[slot]
    }

    /// Add a HELP line (first one wins)
    pub fn help(&mut self, name: &str, description: &str) -> &mut Self {
        let family = self.family(name);
        family.help.get_or_insert_with(|| description.to_string());
        self
    }

    /// Add a TYPE line (first one wins)
    pub fn type_(&mut self, name: &str, metric_type: &str) -> &mut Self {
        let family = self.family(name);
        family
            .metric_type
            .get_or_insert_with(|| metric_type.to_string());
        self
    }

    /// Add a metric line with labels
    pub fn metric(
        &mut self,
        name: &str,
        labels: &[(&str, &str)],
        value: impl ToString,
    ) -> &mut Self {
        let mut line = String::from(name);

        if !labels.is_empty() {
            line.push('{');
            for (i, (key, value)) in labels.iter().enumerate() {
                if i > 0 {
                    line.push_str(", ");
                }
                // Escape quotes in values for Prometheus format
                let escaped_value = value.replace('"', "\\\"");
                line.push_str(&format!("{key}=\"{escaped_value}\""));
            }
            line.push('}');
        }

        line.push(' ');
        line.push_str(&value.to_string());
        self.family(name).samples.push(line);
        self
    }

    /// Build the final metric string
    pub fn build(self) -> String {
        let mut out = String::new();
        for family in self.families {
            if let Some(help) = &family.help {
                out.push_str(&format!("# HELP {} {help}\n", family.name));
            }
            if let Some(metric_type) = &family.metric_type {
                out.push_str(&format!("# TYPE {} {metric_type}\n", family.name));
            }
            for sample in &family.samples {
                out.push_str(sample);
                out.push('\n');
            }
        }
        out
    }
}

/// A decoded entry name split into its field and positional labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLabels<'a> {
    pub field: &'a str,
    pub index: Option<&'a str>,
    pub instance: Option<&'a str>,
    pub smn: Option<&'a str>,
}

static ENTRY_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([^\[.]+)(?:\[(\d+)\])?(?:\.instance\[(\d+)\])?(?:\.smn\[(\d+)\])?$").unwrap()
});

/// Parses `name[i].instance[n].smn[m]` style names; every suffix is optional.
pub fn parse_entry_name(name: &str) -> Option<EntryLabels<'_>> {
    let caps = ENTRY_NAME_RE.captures(name)?;
    Some(EntryLabels {
        field: caps.get(1)?.as_str(),
        index: caps.get(2).map(|m| m.as_str()),
        instance: caps.get(3).map(|m| m.as_str()),
        smn: caps.get(4).map(|m| m.as_str()),
    })
}

/// Converts firmware field names such as `MaxSocketTemperature` or
/// `GfxLockXCDMak` into Prometheus-friendly snake case.
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 8);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            let boundary = prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower);
            if boundary {
                out.push('_');
            }
        }
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else {
            out.push('_');
        }
    }
    out
}
