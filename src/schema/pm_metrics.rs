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

// PM metrics table layouts, one per firmware metrics version.

use super::FieldFlag::Accumulator;
use super::FieldType::{U16, U32, U64};
use super::{FieldDescriptor as F, Schema};

/// SMU 13.0.6 PM metrics, table revision 8 (header version word 4).
pub static SMU_13_0_6_V8: Schema = Schema::new("smu_13_0_6_v8", &SMU_13_0_6_V8_FIELDS);

static SMU_13_0_6_V8_FIELDS: [F; 68] = [
    // header
    F::scalar(U16, "structure_size"),
    F::scalar(U16, "pad"),
    F::scalar(U32, "mp1_ip_discovery_version"),
    F::scalar(U32, "pmfw_version"),
    F::scalar(U32, "pmmetrics_version"),
    F::scalar(U32, "AccumulationCounter"),
    // temperature
    F::scalar(U32, "MaxSocketTemperature"),
    F::scalar(U32, "MaxVrTemperature"),
    F::scalar(U32, "MaxHbmTemperature"),
    F::flagged(U64, "MaxSocketTemperatureAcc", Accumulator),
    F::flagged(U64, "MaxVrTemperatureAcc", Accumulator),
    F::flagged(U64, "MaxHbmTemperatureAcc", Accumulator),
    // power
    F::scalar(U32, "SocketPowerLimit"),
    F::scalar(U32, "MaxSocketPowerLimit"),
    F::scalar(U32, "SocketPower"),
    // energy
    F::scalar(U64, "Timestamp"),
    F::flagged(U64, "SocketEnergyAcc", Accumulator),
    F::flagged(U64, "CcdEnergyAcc", Accumulator),
    F::flagged(U64, "XcdEnergyAcc", Accumulator),
    F::flagged(U64, "AidEnergyAcc", Accumulator),
    F::flagged(U64, "HbmEnergyAcc", Accumulator),
    // frequency
    F::scalar(U32, "CclkFrequencyLimit"),
    F::scalar(U32, "GfxclkFrequencyLimit"),
    F::scalar(U32, "FclkFrequency"),
    F::scalar(U32, "UclkFrequency"),
    F::array(U32, 4, "SocclkFrequency"),
    F::array(U32, 4, "VclkFrequency"),
    F::array(U32, 4, "DclkFrequency"),
    F::array(U32, 4, "LclkFrequency"),
    F::new(U64, 8, "GfxclkFrequencyAcc", Accumulator),
    F::new(U64, 96, "CclkFrequencyAcc", Accumulator),
    // frequency range
    F::scalar(U32, "MaxCclkFrequency"),
    F::scalar(U32, "MinCclkFrequency"),
    F::scalar(U32, "MaxGfxclkFrequency"),
    F::scalar(U32, "MinGfxclkFrequency"),
    F::array(U32, 4, "FclkFrequencyTable"),
    F::array(U32, 4, "UclkFrequencyTable"),
    F::array(U32, 4, "SocclkFrequencyTable"),
    F::array(U32, 4, "VclkFrequencyTable"),
    F::array(U32, 4, "DclkFrequencyTable"),
    F::array(U32, 4, "LclkFrequencyTable"),
    F::scalar(U32, "MaxLclkDpmRange"),
    F::scalar(U32, "MinLclkDpmRange"),
    // xgmi
    F::scalar(U32, "XgmiWidth"),
    F::scalar(U32, "XgmiBitrate"),
    F::array(U64, 8, "XgmiReadBandwidthAcc"),
    F::array(U64, 8, "XgmiWriteBandwidthAcc"),
    // activity
    F::scalar(U32, "SocketC0Residency"),
    F::scalar(U32, "SocketGfxBusy"),
    F::scalar(U32, "DramBandwidthUtilization"),
    F::flagged(U64, "SocketC0ResidencyAcc", Accumulator),
    F::flagged(U64, "SocketGfxBusyAcc", Accumulator),
    F::flagged(U64, "DramBandwidthAcc", Accumulator),
    F::scalar(U32, "MaxDramBandwidth"),
    F::flagged(U64, "DramBandwidthUtilizationAcc", Accumulator),
    F::new(U64, 4, "PcieBandwidthAcc", Accumulator),
    // throttlers
    F::flagged(U32, "ProchotResidencyAcc", Accumulator),
    F::flagged(U32, "PptResidencyAcc", Accumulator),
    F::flagged(U32, "SocketThmResidencyAcc", Accumulator),
    F::flagged(U32, "VrThmResidencyAcc", Accumulator),
    F::flagged(U32, "HbmThmResidencyAcc", Accumulator),
    F::scalar(U32, "GfxLockXCDMak"),
    // clocks
    F::array(U32, 8, "GfxclkFrequency"),
    // serial numbers
    F::array(U64, 4, "PublicSerialNumber_AID"),
    F::array(U64, 8, "PublicSerialNumber_XCD"),
    F::array(U64, 12, "PublicSerialNumber_CCD"),
    // xgmi data size
    F::new(U64, 8, "XgmiReadDataSizeAcc", Accumulator),
    F::new(U64, 8, "XgmiWriteDataSizeAcc", Accumulator),
];
