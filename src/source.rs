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

//! Sysfs byte source for amdgpu metric tables.
//!
//! The driver exposes two binary nodes per card:
//! `/sys/class/drm/card<N>/device/pm_metrics` and
//! `/sys/class/drm/card<N>/device/reg_state`. This module only reads bytes;
//! decoding happens elsewhere.

use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::common::config::AppConfig;
use crate::error::{Error, Result};

// DRM card directories, e.g. `card0`; connectors like `card0-DP-1` do not match.
static CARD_DIR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^card(\d+)$").unwrap());

/// Reads at most `max_len` bytes of `path` starting at `offset`.
///
/// A short read is fine; the returned length is what the decoder checks
/// against.
pub fn read_table_bytes(path: &Path, offset: u64, max_len: usize) -> Result<Vec<u8>> {
    let mut file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::DeviceNotFound(path.display().to_string()),
        _ => Error::Io(e),
    })?;
    file.seek(SeekFrom::Start(offset))?;

    let mut buf = Vec::with_capacity(max_len);
    file.take(max_len as u64).read_to_end(&mut buf)?;
    debug!(
        "read {} bytes from {} at offset {offset:#x}",
        buf.len(),
        path.display()
    );
    Ok(buf)
}

/// `<drm_root>/card<N>/device`
pub fn card_device_dir(drm_root: &Path, card: u32) -> PathBuf {
    drm_root.join(format!("card{card}")).join("device")
}

pub fn pm_metrics_path(drm_root: &Path, card: u32) -> PathBuf {
    card_device_dir(drm_root, card).join(AppConfig::PM_METRICS_FILE)
}

pub fn reg_state_path(drm_root: &Path, card: u32) -> PathBuf {
    card_device_dir(drm_root, card).join(AppConfig::REG_STATE_FILE)
}

/// Card indices under `drm_root` that expose a `pm_metrics` node, sorted.
///
/// Connector entries such as `card0-DP-1` are skipped.
pub fn discover_cards(drm_root: &Path) -> Vec<u32> {
    let entries = match fs::read_dir(drm_root) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("cannot scan {}: {e}", drm_root.display());
            return Vec::new();
        }
    };

    let mut cards: Vec<u32> = entries
        .flatten()
        .filter_map(|entry| {
            let file_name = entry.file_name();
            let name = file_name.to_str()?;
            let caps = CARD_DIR_RE.captures(name)?;
            caps.get(1)?.as_str().parse::<u32>().ok()
        })
        .filter(|card| pm_metrics_path(drm_root, *card).is_file())
        .collect();

    cards.sort_unstable();
    cards
}
