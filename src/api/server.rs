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

use axum::{routing::get, Router};
use std::path::PathBuf;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{metrics_handler, SharedState};
use crate::app_state::{AppState, CardSnapshot};
use crate::cli::ApiArgs;
use crate::common::config::EnvConfig;
use crate::source::discover_cards;

/// Cards to poll: the explicit list, or whatever exposes `pm_metrics` now.
fn select_cards(drm_root: &std::path::Path, requested: &[u32]) -> Vec<u32> {
    if requested.is_empty() {
        discover_cards(drm_root)
    } else {
        requested.to_vec()
    }
}

/// Snapshot every selected card. Discovery reruns each call when no cards
/// were requested, so late-bound devices show up.
fn poll_cards(drm_root: &std::path::Path, requested: &[u32]) -> Vec<CardSnapshot> {
    let cards = select_cards(drm_root, requested);
    if cards.is_empty() {
        tracing::debug!("No amdgpu cards with pm_metrics under {}", drm_root.display());
    }
    cards
        .iter()
        .map(|card| CardSnapshot::collect(drm_root, *card))
        .collect()
}

/// Run the API server, refreshing every card's tables in the background.
pub async fn run_api_mode(args: &ApiArgs, drm_root: PathBuf) {
    println!("Starting API mode...");
    let state = SharedState::new(RwLock::new(AppState::new()));
    let state_clone = state.clone();
    let interval = EnvConfig::refresh_interval(args.interval);
    let requested = args.cards.clone();

    if requested.is_empty() {
        tracing::info!(
            "Polling every card under {} every {interval}s",
            drm_root.display()
        );
    } else {
        tracing::info!("Polling cards {requested:?} every {interval}s");
    }

    // Spawn background task for collecting metrics
    tokio::spawn(async move {
        loop {
            let root = drm_root.clone();
            let requested = requested.clone();
            // sysfs reads block; keep them off the runtime workers
            let snapshots =
                tokio::task::spawn_blocking(move || poll_cards(&root, &requested)).await;

            match snapshots {
                Ok(snapshots) => {
                    let mut state = state_clone.write().await;
                    state.cards = snapshots;
                    if state.loading {
                        state.loading = false;
                    }
                }
                Err(e) => tracing::error!("Table refresh task failed: {e}"),
            }

            tokio::time::sleep(Duration::from_secs(interval)).await;
        }
    });

    // Create the router with shared state
    let app = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    let port = args.port;
    let listener = match TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind TCP listener on port {port}: {e}");
            eprintln!("Error: Failed to bind TCP listener on port {port}: {e}");
            return;
        }
    };

    tracing::info!("API server listening on http://0.0.0.0:{port}/metrics");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("TCP server error: {e}");
    }
}
