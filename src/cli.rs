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

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::common::config::AppConfig;
use crate::output::OutputFormat;
use crate::registry::RegisterSpace;
use crate::source::{pm_metrics_path, reg_state_path};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root of the DRM class directory holding card<N>/device nodes.
    #[arg(long, global = true, default_value = AppConfig::DEFAULT_DRM_ROOT)]
    pub drm_root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode the PM metrics table of one card.
    PmMetrics(PmMetricsArgs),
    /// Decode one register space of the register-state table.
    RegState(RegStateArgs),
    /// Run in API mode, exposing decoded tables in Prometheus format.
    Api(ApiArgs),
}

/// Where to read a table from: a card under the DRM root or an explicit file.
#[derive(Args, Clone, Debug)]
pub struct TableSource {
    /// Card index under the DRM root.
    #[arg(short, long, default_value_t = 0, conflicts_with = "file")]
    pub card: u32,
    /// Read the table from this file instead of sysfs.
    #[arg(short, long)]
    pub file: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl TableSource {
    /// Card label for reports; `None` when reading an explicit file.
    pub fn card_label(&self) -> Option<u32> {
        match self.file {
            Some(_) => None,
            None => Some(self.card),
        }
    }
}

#[derive(Parser, Clone, Debug)]
pub struct PmMetricsArgs {
    #[command(flatten)]
    pub source: TableSource,
}

impl PmMetricsArgs {
    pub fn path(&self, drm_root: &std::path::Path) -> PathBuf {
        self.source
            .file
            .clone()
            .unwrap_or_else(|| pm_metrics_path(drm_root, self.source.card))
    }
}

#[derive(Parser, Clone, Debug)]
pub struct RegStateArgs {
    /// Register space to decode.
    #[arg(short, long, value_enum)]
    pub space: RegisterSpace,
    #[command(flatten)]
    pub source: TableSource,
}

impl RegStateArgs {
    pub fn path(&self, drm_root: &std::path::Path) -> PathBuf {
        self.source
            .file
            .clone()
            .unwrap_or_else(|| reg_state_path(drm_root, self.source.card))
    }
}

#[derive(Parser, Clone, Debug)]
pub struct ApiArgs {
    /// The port to listen on for the API server.
    #[arg(short, long, default_value_t = AppConfig::DEFAULT_API_PORT)]
    pub port: u16,
    /// The interval in seconds at which tables are re-read.
    #[arg(short, long, default_value_t = AppConfig::DEFAULT_UPDATE_INTERVAL_SECS)]
    pub interval: u64,
    /// Cards to poll. Defaults to every card exposing pm_metrics.
    #[arg(long = "card", num_args = 1..)]
    pub cards: Vec<u32>,
}
