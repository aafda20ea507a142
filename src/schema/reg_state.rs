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

//! Register-state table layouts.
//!
//! Every register space shares the same framing:
//!
//! ```text
//! header    : structure_size u16, format_revision u8, content_revision u8,
//!             state_type u8, num_instances u8, pad u16
//! instance  : instance u16, state u16, num_smn_regs u16, pad u16, [body]
//! smn entry : addr u64, value u32, pad u32
//! ```
//!
//! PCIe instances carry a link-status body between the instance header and
//! the SMN entries.

use super::FieldFlag::{InstanceStart, NumInstance, NumSmn, SmnStart};
use super::FieldType::{U16, U32, U64, U8};
use super::{FieldDescriptor as F, Schema};

pub static XGMI_REGS: Schema = Schema::new("xgmi", &LINK_REGS_FIELDS);
pub static WAFL_REGS: Schema = Schema::new("wafl", &LINK_REGS_FIELDS);
pub static USR_REGS: Schema = Schema::new("usr", &LINK_REGS_FIELDS);
pub static PCIE_REGS: Schema = Schema::new("pcie", &PCIE_REGS_FIELDS);

// XGMI, WAFL and USR tables have identical layouts.
static LINK_REGS_FIELDS: [F; 13] = [
    F::scalar(U16, "structure_size"),
    F::scalar(U8, "format_revision"),
    F::scalar(U8, "content_revision"),
    F::scalar(U8, "state_type"),
    F::flagged(U8, "num_instances", NumInstance),
    F::scalar(U16, "pad"),
    F::flagged(U16, "instance", InstanceStart),
    F::scalar(U16, "state"),
    F::flagged(U16, "num_smn_regs", NumSmn),
    F::scalar(U16, "pad"),
    F::flagged(U64, "addr", SmnStart),
    F::scalar(U32, "value"),
    F::scalar(U32, "pad"),
];

static PCIE_REGS_FIELDS: [F; 18] = [
    F::scalar(U16, "structure_size"),
    F::scalar(U8, "format_revision"),
    F::scalar(U8, "content_revision"),
    F::scalar(U8, "state_type"),
    F::flagged(U8, "num_instances", NumInstance),
    F::scalar(U16, "pad"),
    F::flagged(U16, "instance", InstanceStart),
    F::scalar(U16, "state"),
    F::flagged(U16, "num_smn_regs", NumSmn),
    F::scalar(U16, "pad"),
    F::scalar(U16, "device_status"),
    F::scalar(U16, "link_status"),
    F::scalar(U32, "sub_bus_number_latency"),
    F::scalar(U32, "pcie_corr_err_status"),
    F::scalar(U32, "pcie_uncorr_err_status"),
    F::flagged(U64, "addr", SmnStart),
    F::scalar(U32, "value"),
    F::scalar(U32, "pad"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldFlag;

    #[test]
    fn test_register_schemas_are_nested_layouts() {
        for schema in [&XGMI_REGS, &WAFL_REGS, &PCIE_REGS, &USR_REGS] {
            assert!(schema.is_valid_nested(), "{} layout", schema.name());
            assert_eq!(schema.position_of(FieldFlag::NumInstance), Some(4));
            assert_eq!(schema.position_of(FieldFlag::InstanceStart), Some(6));
        }
    }

    #[test]
    fn test_pcie_body_sits_between_header_and_smn() {
        assert_eq!(PCIE_REGS.position_of(FieldFlag::SmnStart), Some(15));
        assert_eq!(XGMI_REGS.position_of(FieldFlag::SmnStart), Some(10));
    }
}
