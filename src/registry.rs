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

//! Schema selection for PM metrics versions and register spaces.
//!
//! The registry is static and read-only, so lookups are safe from any
//! thread without locking.

use std::fmt;

use clap::ValueEnum;
use tracing::debug;

use crate::common::config::{AppConfig, EnvConfig};
use crate::decoder::{decode_flat, decode_nested};
use crate::error::DecodeError;
use crate::record::Record;
use crate::schema::pm_metrics::SMU_13_0_6_V8;
use crate::schema::reg_state::{PCIE_REGS, USR_REGS, WAFL_REGS, XGMI_REGS};
use crate::schema::Schema;

/// Byte offset of the version word in the PM metrics header.
pub const PM_METRICS_VERSION_OFFSET: usize = AppConfig::PM_METRICS_VERSION_OFFSET;

/// Known PM metrics versions and their layouts.
static PM_METRICS_SCHEMAS: [(u32, &Schema); 1] = [(4, &SMU_13_0_6_V8)];

/// Register spaces exposed through the shared `reg_state` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum RegisterSpace {
    Xgmi,
    Wafl,
    Pcie,
    Usr,
    Usr1,
}

impl RegisterSpace {
    pub const ALL: [RegisterSpace; 5] = [
        RegisterSpace::Xgmi,
        RegisterSpace::Wafl,
        RegisterSpace::Pcie,
        RegisterSpace::Usr,
        RegisterSpace::Usr1,
    ];

    /// Numeric identifier, also the region index inside `reg_state`.
    pub fn id(self) -> u32 {
        match self {
            RegisterSpace::Xgmi => 0,
            RegisterSpace::Wafl => 1,
            RegisterSpace::Pcie => 2,
            RegisterSpace::Usr => 3,
            RegisterSpace::Usr1 => 4,
        }
    }

    /// Byte offset of this space's region in the `reg_state` file.
    pub fn offset(self) -> u64 {
        EnvConfig::reg_state_offset(self.id())
    }

    pub fn schema(self) -> &'static Schema {
        match self {
            RegisterSpace::Xgmi => &XGMI_REGS,
            RegisterSpace::Wafl => &WAFL_REGS,
            RegisterSpace::Pcie => &PCIE_REGS,
            // both user spaces share one layout
            RegisterSpace::Usr | RegisterSpace::Usr1 => &USR_REGS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RegisterSpace::Xgmi => "xgmi",
            RegisterSpace::Wafl => "wafl",
            RegisterSpace::Pcie => "pcie",
            RegisterSpace::Usr => "usr",
            RegisterSpace::Usr1 => "usr1",
        }
    }
}

impl fmt::Display for RegisterSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u32> for RegisterSpace {
    type Error = DecodeError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        RegisterSpace::ALL
            .into_iter()
            .find(|space| space.id() == id)
            .ok_or(DecodeError::UnknownSpace(id))
    }
}

/// Reads the little-endian version word from a PM metrics buffer.
pub fn pm_metrics_version(buffer: &[u8]) -> Result<u32, DecodeError> {
    let end = PM_METRICS_VERSION_OFFSET + 4;
    let bytes = buffer
        .get(PM_METRICS_VERSION_OFFSET..end)
        .ok_or(DecodeError::Truncated {
            field: "pmmetrics_version",
            needed: end,
            available: buffer.len(),
        })?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Layout registered for a PM metrics version.
pub fn schema_for_version(version: u32) -> Result<&'static Schema, DecodeError> {
    PM_METRICS_SCHEMAS
        .iter()
        .find(|(known, _)| *known == version)
        .map(|(_, schema)| *schema)
        .ok_or(DecodeError::UnsupportedVersion(version))
}

/// Picks the PM metrics layout from the version word embedded in `buffer`.
pub fn select_pm_schema(buffer: &[u8]) -> Result<&'static Schema, DecodeError> {
    let version = pm_metrics_version(buffer)?;
    let schema = schema_for_version(version)?;
    debug!("PM metrics version {version} uses schema {}", schema.name());
    Ok(schema)
}

/// Layout and `reg_state` byte offset of a register space.
pub fn select_register_schema(space: RegisterSpace) -> (&'static Schema, u64) {
    (space.schema(), space.offset())
}

/// Same as [`select_register_schema`] for a raw space identifier.
pub fn select_register_schema_by_id(id: u32) -> Result<(&'static Schema, u64), DecodeError> {
    RegisterSpace::try_from(id).map(select_register_schema)
}

/// Selects the layout from the header and decodes a whole PM metrics buffer.
pub fn decode_pm_metrics(buffer: &[u8]) -> Result<Record, DecodeError> {
    let schema = select_pm_schema(buffer)?;
    decode_flat(buffer, schema)
}

/// Decodes one register space. `buffer` must start at the space's offset.
pub fn decode_reg_state(buffer: &[u8], space: RegisterSpace) -> Result<Record, DecodeError> {
    let (schema, _) = select_register_schema(space);
    decode_nested(buffer, schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pm_header(version: u32) -> Vec<u8> {
        let mut buf = vec![0u8; 16];
        buf[PM_METRICS_VERSION_OFFSET..16].copy_from_slice(&version.to_le_bytes());
        buf
    }

    #[test]
    fn test_version_word_is_read_at_offset_12() {
        assert_eq!(pm_metrics_version(&pm_header(4)).unwrap(), 4);
        assert_eq!(pm_metrics_version(&pm_header(0x0102_0304)).unwrap(), 0x0102_0304);
    }

    #[test]
    fn test_short_header_is_truncated() {
        let err = pm_metrics_version(&[0u8; 15]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Truncated {
                field: "pmmetrics_version",
                needed: 16,
                available: 15,
            }
        );
    }

    #[test]
    fn test_select_known_and_unknown_versions() {
        assert_eq!(select_pm_schema(&pm_header(4)).unwrap().name(), "smu_13_0_6_v8");
        assert_eq!(
            select_pm_schema(&pm_header(8)).unwrap_err(),
            DecodeError::UnsupportedVersion(8)
        );
    }

    #[test]
    fn test_register_space_offsets() {
        let offsets: Vec<u64> = RegisterSpace::ALL.iter().map(|s| s.offset()).collect();
        assert_eq!(offsets, vec![0x0000, 0x1000, 0x2000, 0x3000, 0x4000]);
    }

    #[test]
    fn test_register_space_schemas() {
        assert_eq!(select_register_schema(RegisterSpace::Pcie).0.name(), "pcie");
        assert_eq!(select_register_schema(RegisterSpace::Usr1).0.name(), "usr");
        assert_eq!(select_register_schema(RegisterSpace::Usr1).1, 0x4000);
    }

    #[test]
    fn test_unknown_space_id() {
        assert_eq!(RegisterSpace::try_from(2).unwrap(), RegisterSpace::Pcie);
        assert_eq!(
            select_register_schema_by_id(5).unwrap_err(),
            DecodeError::UnknownSpace(5)
        );
    }

    #[test]
    fn test_space_names_round_trip_through_clap() {
        for space in RegisterSpace::ALL {
            let parsed = RegisterSpace::from_str(space.as_str(), true).unwrap();
            assert_eq!(parsed, space);
            assert_eq!(space.to_string(), space.as_str());
        }
    }
}
