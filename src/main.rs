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

use amdgpu_tables::api::run_api_mode;
use amdgpu_tables::cli::{Cli, Commands, TableSource};
use amdgpu_tables::common::config::AppConfig;
use amdgpu_tables::output::{render, TableReport};
use amdgpu_tables::present::{present_pm_table, present_reg_state};
use amdgpu_tables::Result;
use clap::Parser;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_report(report: &TableReport, source: &TableSource) {
    match render(report, source.format) {
        Ok(text) => print!("{text}"),
        Err(e) => {
            eprintln!("Error: failed to render {}: {e}", report.table);
            std::process::exit(1);
        }
    }
}

fn run_pm_metrics(path: &Path, source: &TableSource) -> Result<()> {
    let (schema, record) = present_pm_table(path)?;
    let report = TableReport::new(
        source.card_label(),
        AppConfig::PM_METRICS_FILE,
        schema.name(),
        record,
    );
    print_report(&report, source);
    Ok(())
}

fn run_reg_state(
    path: &Path,
    space: amdgpu_tables::RegisterSpace,
    source: &TableSource,
) -> Result<()> {
    let record = present_reg_state(path, space)?;
    let report = TableReport::new(
        source.card_label(),
        format!("{}.{space}", AppConfig::REG_STATE_FILE),
        space.schema().name(),
        record,
    );
    print_report(&report, source);
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = match cli.command {
        Commands::Api(_) => AppConfig::API_LOG_FILTER,
        _ => AppConfig::DEFAULT_LOG_FILTER,
    };
    init_tracing(filter);

    let outcome = match cli.command {
        Commands::PmMetrics(args) => run_pm_metrics(&args.path(&cli.drm_root), &args.source),
        Commands::RegState(args) => {
            run_reg_state(&args.path(&cli.drm_root), args.space, &args.source)
        }
        Commands::Api(args) => {
            tokio::spawn(async {
                if signal::ctrl_c().await.is_ok() {
                    std::process::exit(0);
                }
            });
            run_api_mode(&args, cli.drm_root).await;
            Ok(())
        }
    };

    if let Err(e) = outcome {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
