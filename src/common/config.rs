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

/// Application configuration constants
pub struct AppConfig;

impl AppConfig {
    // Byte source limits
    pub const PM_METRICS_MAX_BYTES: usize = 65536;
    pub const REG_STATE_MAX_BYTES: usize = 4096;
    pub const REG_STATE_REGION_SIZE: u64 = 0x1000;

    // Wire format
    /// Byte offset of the `pmmetrics_version` word inside the PM metrics header.
    pub const PM_METRICS_VERSION_OFFSET: usize = 12;

    // Decoded record sizing
    pub const RECORD_INITIAL_CAPACITY: usize = 64;
    pub const RECORD_GROWTH: usize = 64;

    // Sysfs layout
    pub const DEFAULT_DRM_ROOT: &'static str = "/sys/class/drm";
    pub const PM_METRICS_FILE: &'static str = "pm_metrics";
    pub const REG_STATE_FILE: &'static str = "reg_state";

    // API mode
    pub const DEFAULT_API_PORT: u16 = 9090;
    pub const DEFAULT_UPDATE_INTERVAL_SECS: u64 = 3;

    // Logging
    pub const DEFAULT_LOG_FILTER: &'static str = "amdgpu_tables=info";
    pub const API_LOG_FILTER: &'static str = "amdgpu_tables=debug,tower_http=debug";
}

/// Environment-specific configuration
pub struct EnvConfig;

impl EnvConfig {
    /// Refresh interval for API mode, never below one second.
    pub fn refresh_interval(requested: u64) -> u64 {
        requested.max(1)
    }

    /// Byte offset of a register-space region inside the shared `reg_state` file.
    pub fn reg_state_offset(space_index: u32) -> u64 {
        space_index as u64 * AppConfig::REG_STATE_REGION_SIZE
    }
}
