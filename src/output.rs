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

//! Renderers for decoded tables.

use clap::ValueEnum;
use serde::Serialize;

use crate::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned `name value` lines.
    #[default]
    Text,
    /// Pretty-printed JSON report.
    Json,
}

/// A decoded table plus where and when it was read.
#[derive(Debug, Clone, Serialize)]
pub struct TableReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<u32>,
    /// `pm_metrics` or `reg_state.<space>`
    pub table: String,
    pub schema: &'static str,
    /// RFC 3339 timestamp
    pub collected_at: String,
    pub entries: Record,
}

impl TableReport {
    pub fn new(
        card: Option<u32>,
        table: impl Into<String>,
        schema: &'static str,
        entries: Record,
    ) -> Self {
        Self {
            card,
            table: table.into(),
            schema,
            collected_at: chrono::Utc::now().to_rfc3339(),
            entries,
        }
    }
}

/// One `name value` line per entry, names padded to the longest one.
pub fn render_text(record: &Record) -> String {
    let width = record.iter().map(|e| e.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for entry in record {
        out.push_str(&format!("{:<width$} {}\n", entry.name, entry.value));
    }
    out
}

pub fn render_json(report: &TableReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

pub fn render(report: &TableReport, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(&report.entries)),
        OutputFormat::Json => render_json(report),
    }
}
