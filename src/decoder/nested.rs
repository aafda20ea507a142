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

//! Decoder for register-state tables.
//!
//! A register-state table is a header followed by `num_instances` instance
//! blocks, each holding `num_smn_regs` SMN entries. The counts live in the
//! data, not in the schema, so the schema is walked linearly and the walk
//! jumps back to the INSTANCE_START or SMN_START descriptor whenever the end
//! of the schema is reached with repetitions left.
//!
//! Entry names get `.instance[n]` once the walk is inside an instance block
//! and `.instance[n].smn[m]` inside an SMN entry.

use tracing::debug;

use super::cursor::Cursor;
use crate::error::DecodeError;
use crate::record::Record;
use crate::schema::{FieldDescriptor, FieldFlag, Schema};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkState {
    /// Table header, before the first INSTANCE_START.
    Scanning,
    /// Instance header and body, before SMN_START.
    InInstanceBlock,
    /// Inside one SMN entry.
    InSmnBlock,
}

#[derive(Debug)]
struct Walk {
    state: WalkState,
    num_instance: u64,
    cur_instance: u64,
    num_smn: u64,
    cur_smn: u64,
    instance_start: usize,
    smn_start: usize,
}

impl Walk {
    fn new() -> Self {
        Self {
            state: WalkState::Scanning,
            num_instance: 0,
            cur_instance: 0,
            num_smn: 0,
            cur_smn: 0,
            instance_start: 0,
            smn_start: 0,
        }
    }

    fn enter_instance(&mut self, index: usize) {
        self.state = WalkState::InInstanceBlock;
        self.instance_start = index;
        self.num_smn = 0;
        self.cur_smn = 0;
    }

    fn enter_smn(&mut self, index: usize) {
        self.state = WalkState::InSmnBlock;
        self.smn_start = index;
    }

    fn has_next_instance(&self) -> bool {
        self.cur_instance + 1 < self.num_instance
    }

    /// Descriptor index to resume from at the end of the schema, if any
    /// repetition is left.
    fn next_block(&mut self) -> Option<usize> {
        match self.state {
            WalkState::InSmnBlock if self.cur_smn + 1 < self.num_smn => {
                self.cur_smn += 1;
                Some(self.smn_start)
            }
            WalkState::InInstanceBlock | WalkState::InSmnBlock if self.has_next_instance() => {
                self.cur_instance += 1;
                Some(self.instance_start)
            }
            _ => None,
        }
    }

    fn record_count(&mut self, field: &FieldDescriptor, value: u64) {
        match field.flag {
            FieldFlag::NumInstance => self.num_instance = value,
            FieldFlag::NumSmn => self.num_smn = value,
            _ => {}
        }
    }

    fn entry_name(&self, field: &FieldDescriptor, slot: usize) -> String {
        let mut name = field.name.to_string();
        if field.array_size > 1 {
            name.push_str(&format!("[{slot}]"));
        }
        match self.state {
            WalkState::Scanning => {}
            WalkState::InInstanceBlock => {
                name.push_str(&format!(".instance[{}]", self.cur_instance));
            }
            WalkState::InSmnBlock => {
                name.push_str(&format!(
                    ".instance[{}].smn[{}]",
                    self.cur_instance, self.cur_smn
                ));
            }
        }
        name
    }
}

/// Decodes a register-state table whose instance and SMN counts are carried
/// by the NUM_INSTANCE and NUM_SMN fields of the buffer itself.
///
/// Any overrun aborts the decode; the partial record is dropped.
pub fn decode_nested(buffer: &[u8], schema: &Schema) -> Result<Record, DecodeError> {
    let fields = schema.fields();
    let mut cursor = Cursor::new(buffer);
    let mut record = Record::new();
    let mut walk = Walk::new();
    let mut index = 0;

    loop {
        let Some(field) = fields.get(index) else {
            match walk.next_block() {
                Some(resume) => {
                    index = resume;
                    continue;
                }
                None => break,
            }
        };

        match field.flag {
            FieldFlag::InstanceStart => {
                if walk.state == WalkState::Scanning && walk.num_instance == 0 {
                    break;
                }
                walk.enter_instance(index);
            }
            FieldFlag::SmnStart if walk.state != WalkState::Scanning => {
                if walk.num_smn == 0 {
                    if !walk.has_next_instance() {
                        break;
                    }
                    // No SMN entries: the bytes under this field are the next
                    // instance header. Read them for the bounds check, then undo.
                    let mark = cursor.position();
                    cursor.read(field)?;
                    cursor.rewind_to(mark);
                    walk.cur_instance += 1;
                    index = walk.instance_start;
                    continue;
                }
                walk.enter_smn(index);
            }
            _ => {}
        }

        for slot in 0..field.array_size {
            let value = cursor.read(field)?;
            walk.record_count(field, value);
            record.push(walk.entry_name(field, slot), value);
        }
        index += 1;
    }

    debug!(
        "decoded {} entries ({} instances) from {} of {} bytes using schema {}",
        record.len(),
        walk.num_instance,
        cursor.position(),
        buffer.len(),
        schema.name()
    );
    Ok(record)
}
