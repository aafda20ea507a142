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

use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::api::metrics::pm_metrics::PmMetricsExporter;
use crate::api::metrics::reg_state::RegStateExporter;
use crate::api::metrics::{MetricBuilder, MetricExporter};
use crate::app_state::AppState;

pub type SharedState = Arc<RwLock<AppState>>;

pub async fn metrics_handler(State(state): State<SharedState>) -> (StatusCode, String) {
    let state = state.read().await;
    metrics_response(&state)
}

/// 503 with an empty body until the first refresh has landed.
pub fn metrics_response(state: &AppState) -> (StatusCode, String) {
    if state.loading {
        return (StatusCode::SERVICE_UNAVAILABLE, String::new());
    }
    (StatusCode::OK, render_metrics(state))
}

/// Prometheus exposition for the latest snapshot of every card.
pub fn render_metrics(state: &AppState) -> String {
    let mut builder = MetricBuilder::new();

    for snapshot in &state.cards {
        let card = snapshot.card.to_string();

        if let Some(table) = &snapshot.pm_metrics {
            PmMetricsExporter::new(snapshot.card, table.schema, &table.record)
                .export_into(&mut builder);
        }
        for (space, table) in &snapshot.reg_state {
            RegStateExporter::new(snapshot.card, *space, &table.record).export_into(&mut builder);
        }

        for table in &snapshot.failed {
            builder
                .help(
                    "amdgpu_table_decode_failed",
                    "1 when the table could not be read or decoded in the last sample",
                )
                .type_("amdgpu_table_decode_failed", "gauge")
                .metric(
                    "amdgpu_table_decode_failed",
                    &[("card", card.as_str()), ("table", table.as_str())],
                    1,
                );
        }
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::CardSnapshot;

    #[test]
    fn test_failed_tables_are_reported() {
        let state = AppState {
            cards: vec![CardSnapshot {
                card: 2,
                pm_metrics: None,
                reg_state: Vec::new(),
                failed: vec!["pm_metrics".to_string()],
            }],
            loading: false,
        };
        let text = render_metrics(&state);
        assert!(text.contains("amdgpu_table_decode_failed{card=\"2\", table=\"pm_metrics\"} 1\n"));
    }

    #[test]
    fn test_unavailable_until_first_refresh() {
        let mut state = AppState::new();
        assert_eq!(
            metrics_response(&state),
            (StatusCode::SERVICE_UNAVAILABLE, String::new())
        );

        state.loading = false;
        state.cards.push(CardSnapshot {
            card: 0,
            pm_metrics: None,
            reg_state: Vec::new(),
            failed: vec!["pm_metrics".to_string()],
        });
        let (status, body) = metrics_response(&state);
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("amdgpu_table_decode_failed"));
    }

    #[test]
    fn test_empty_state_renders_nothing() {
        assert_eq!(render_metrics(&AppState::new()), "");
    }
}
