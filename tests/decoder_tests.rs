use amdgpu_tables::decoder::{decode_flat, decode_nested};
use amdgpu_tables::registry::{
    decode_pm_metrics, decode_reg_state, select_pm_schema, select_register_schema_by_id,
    RegisterSpace,
};
use amdgpu_tables::schema::pm_metrics::SMU_13_0_6_V8;
use amdgpu_tables::schema::{FieldDescriptor, FieldType, Schema};
use amdgpu_tables::DecodeError;

const HEADER_SIZE: usize = 8;
const INSTANCE_SIZE: usize = 8;
const PCIE_BODY_SIZE: usize = 16;
const SMN_SIZE: usize = 16;

static SCENARIO_FIELDS: [FieldDescriptor; 3] = [
    FieldDescriptor::scalar(FieldType::U16, "structure_size"),
    FieldDescriptor::scalar(FieldType::U16, "pad"),
    FieldDescriptor::scalar(FieldType::U32, "mp1_ip_discovery_version"),
];
static SCENARIO: Schema = Schema::new("scenario", &SCENARIO_FIELDS);

fn pm_buffer(version: u32) -> Vec<u8> {
    let mut buf: Vec<u8> = (0..SMU_13_0_6_V8.flat_size())
        .map(|i| (i % 251) as u8)
        .collect();
    buf[12..16].copy_from_slice(&version.to_le_bytes());
    buf
}

/// Register-state image with one instance per entry of `smn_counts`.
fn reg_buffer(space: RegisterSpace, smn_counts: &[u16]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&16u16.to_le_bytes());
    buf.extend_from_slice(&[1, 0, space.id() as u8, smn_counts.len() as u8]);
    buf.extend_from_slice(&0u16.to_le_bytes());

    for (id, &count) in smn_counts.iter().enumerate() {
        for word in [id as u16, 0x3, count, 0] {
            buf.extend_from_slice(&word.to_le_bytes());
        }
        if space == RegisterSpace::Pcie {
            buf.extend_from_slice(&0x0010u16.to_le_bytes());
            buf.extend_from_slice(&0x1043u16.to_le_bytes());
            buf.extend_from_slice(&0x0001_0000u32.to_le_bytes());
            buf.extend_from_slice(&0u32.to_le_bytes());
            buf.extend_from_slice(&0u32.to_le_bytes());
        }
        for smn in 0..count {
            let addr = 0x1a_0000u64 + ((id as u64) << 8) + smn as u64 * 4;
            buf.extend_from_slice(&addr.to_le_bytes());
            buf.extend_from_slice(&(id as u32 * 100 + smn as u32).to_le_bytes());
            buf.extend_from_slice(&0u32.to_le_bytes());
        }
    }
    buf
}

fn expected_size(space: RegisterSpace, smn_counts: &[u16]) -> usize {
    let body = if space == RegisterSpace::Pcie {
        PCIE_BODY_SIZE
    } else {
        0
    };
    HEADER_SIZE
        + smn_counts
            .iter()
            .map(|&m| INSTANCE_SIZE + body + m as usize * SMN_SIZE)
            .sum::<usize>()
}

fn assert_truncated<T: std::fmt::Debug>(result: Result<T, DecodeError>, k: usize) {
    match result {
        Err(DecodeError::Truncated { available, .. }) => assert_eq!(available, k),
        other => panic!("expected Truncated at length {k}, got {other:?}"),
    }
}

#[test]
fn test_literal_header_scenario() {
    let record = decode_flat(&[0x10, 0x00, 0x00, 0x00, 0x07, 0x00, 0x00, 0x00], &SCENARIO).unwrap();
    assert_eq!(
        record.to_pairs(),
        vec![
            ("structure_size", 16),
            ("pad", 0),
            ("mp1_ip_discovery_version", 7)
        ]
    );
}

#[test]
fn test_flat_guard_byte_is_ignored() {
    let exact = [0x10, 0x00, 0x00, 0x00, 0x07, 0x00, 0x00, 0x00];
    let mut guarded = exact.to_vec();
    guarded.push(0xEE);
    assert_eq!(
        decode_flat(&guarded, &SCENARIO).unwrap(),
        decode_flat(&exact, &SCENARIO).unwrap()
    );
}

#[test]
fn test_pm_metrics_decodes_every_entry() {
    let buf = pm_buffer(4);
    let record = decode_pm_metrics(&buf).unwrap();
    assert_eq!(record.len(), SMU_13_0_6_V8.flat_entry_count());
    assert_eq!(record.get("pmmetrics_version"), Some(4));
    assert!(record.get("CclkFrequencyAcc[95]").is_some());
    assert!(record.get("CclkFrequencyAcc[96]").is_none());
}

#[test]
fn test_pm_metrics_values_match_bytes_written() {
    let mut buf = Vec::new();
    let mut expected = Vec::new();
    let mut seq = 0x0102_0304_0506_0708u64;
    for field in SMU_13_0_6_V8.fields() {
        let width = field.field_type.width();
        for slot in 0..field.array_size {
            let mask = if width == 8 { u64::MAX } else { (1u64 << (width * 8)) - 1 };
            let value = if field.name == "pmmetrics_version" { 4 } else { seq & mask };
            buf.extend_from_slice(&value.to_le_bytes()[..width]);
            let name = if field.array_size == 1 {
                field.name.to_string()
            } else {
                format!("{}[{slot}]", field.name)
            };
            expected.push((name, value));
            seq = seq.rotate_left(7).wrapping_add(0x9e37);
        }
    }

    let record = decode_pm_metrics(&buf).unwrap();
    let decoded: Vec<(String, u64)> = record
        .into_entries()
        .into_iter()
        .map(|e| (e.name, e.value))
        .collect();
    assert_eq!(decoded, expected);
}

#[test]
fn test_pm_metrics_every_short_length_is_truncated() {
    let buf = pm_buffer(4);
    for k in 0..buf.len() {
        assert_truncated(decode_pm_metrics(&buf[..k]), k);
    }
}

#[test]
fn test_pm_metrics_trailing_bytes_do_not_change_output() {
    let buf = pm_buffer(4);
    let mut guarded = buf.clone();
    guarded.extend_from_slice(&[0xFF; 32]);
    assert_eq!(
        decode_pm_metrics(&guarded).unwrap(),
        decode_pm_metrics(&buf).unwrap()
    );
}

#[test]
fn test_unknown_pm_version_is_rejected() {
    for version in [0, 3, 5, u32::MAX] {
        assert_eq!(
            select_pm_schema(&pm_buffer(version)).unwrap_err(),
            DecodeError::UnsupportedVersion(version)
        );
    }
}

#[test]
fn test_nested_entry_counts_follow_buffer() {
    let cases: [&[u16]; 4] = [&[1], &[2, 0, 3], &[0, 0, 1], &[4, 1, 1, 2]];
    for counts in cases {
        let buf = reg_buffer(RegisterSpace::Xgmi, counts);
        assert_eq!(buf.len(), expected_size(RegisterSpace::Xgmi, counts));

        let record = decode_reg_state(&buf, RegisterSpace::Xgmi).unwrap();
        let smn_total: usize = counts.iter().map(|&m| m as usize).sum();
        assert_eq!(
            record.len(),
            6 + counts.len() * 4 + smn_total * 3,
            "counts {counts:?}"
        );
        for (n, &m) in counts.iter().enumerate() {
            assert_eq!(
                record.get(&format!("num_smn_regs.instance[{n}]")),
                Some(m as u64)
            );
            let last = format!("value.instance[{n}].smn[{m}]");
            assert_eq!(record.get(&last), None);
        }
    }
}

#[test]
fn test_zero_smn_instance_does_not_swallow_next_header() {
    let buf = reg_buffer(RegisterSpace::Wafl, &[0, 2]);
    let record = decode_reg_state(&buf, RegisterSpace::Wafl).unwrap();
    assert_eq!(record.get("instance.instance[0]"), Some(0));
    assert_eq!(record.get("instance.instance[1]"), Some(1));
    assert_eq!(record.get("num_smn_regs.instance[1]"), Some(2));
    assert_eq!(record.get("addr.instance[1].smn[1]"), Some(0x1a_0104));
    assert!(!record.iter().any(|e| e.name.ends_with(".instance[0].smn[0]")));
}

#[test]
fn test_zero_instances_yields_header_only() {
    let mut buf = reg_buffer(RegisterSpace::Usr, &[]);
    buf.extend_from_slice(&[0xAB; 24]);
    let record = decode_reg_state(&buf, RegisterSpace::Usr).unwrap();
    let names: Vec<&str> = record.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "structure_size",
            "format_revision",
            "content_revision",
            "state_type",
            "num_instances",
            "pad"
        ]
    );
}

#[test]
fn test_pcie_body_is_named_per_instance() {
    let buf = reg_buffer(RegisterSpace::Pcie, &[1, 1]);
    let record = decode_reg_state(&buf, RegisterSpace::Pcie).unwrap();
    assert_eq!(record.get("link_status.instance[1]"), Some(0x1043));
    assert_eq!(record.get("sub_bus_number_latency.instance[0]"), Some(0x0001_0000));
    assert_eq!(record.get("value.instance[1].smn[0]"), Some(100));
}

#[test]
fn test_every_space_needs_its_full_size() {
    let counts: &[u16] = &[2, 0, 1];
    for space in RegisterSpace::ALL {
        let buf = reg_buffer(space, counts);
        assert_eq!(buf.len(), expected_size(space, counts));

        assert!(decode_reg_state(&buf, space).is_ok(), "{space}");
        assert_truncated(decode_reg_state(&buf[..buf.len() - 1], space), buf.len() - 1);
    }
}

#[test]
fn test_nested_every_short_length_is_truncated() {
    let counts: &[u16] = &[1, 0, 2];
    for space in [RegisterSpace::Xgmi, RegisterSpace::Pcie] {
        let buf = reg_buffer(space, counts);
        for k in 0..buf.len() {
            assert_truncated(decode_reg_state(&buf[..k], space), k);
        }
    }
}

#[test]
fn test_last_instance_without_smn_needs_no_lookahead() {
    let buf = reg_buffer(RegisterSpace::Xgmi, &[1, 0]);
    let record = decode_reg_state(&buf, RegisterSpace::Xgmi).unwrap();
    assert_eq!(record.get("num_smn_regs.instance[1]"), Some(0));
    assert_eq!(record.len(), 6 + 2 * 4 + 3);
}

#[test]
fn test_space_ids_map_to_schemas_and_offsets() {
    let expected = [
        (0, "xgmi", 0x0000),
        (1, "wafl", 0x1000),
        (2, "pcie", 0x2000),
        (3, "usr", 0x3000),
        (4, "usr", 0x4000),
    ];
    for (id, schema, offset) in expected {
        let (found, found_offset) = select_register_schema_by_id(id).unwrap();
        assert_eq!(found.name(), schema);
        assert_eq!(found_offset, offset);
    }
    assert_eq!(
        select_register_schema_by_id(5).unwrap_err(),
        DecodeError::UnknownSpace(5)
    );
}

#[test]
fn test_nested_on_flat_layout_matches_flat() {
    let bytes = [0x10, 0x00, 0x00, 0x00, 0x07, 0x00, 0x00, 0x00];
    assert_eq!(
        decode_nested(&bytes, &SCENARIO).unwrap(),
        decode_flat(&bytes, &SCENARIO).unwrap()
    );
}
