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

use crate::error::DecodeError;
use crate::schema::{FieldDescriptor, FieldType};

/// Bounds-checked little-endian reader over a table buffer.
///
/// Invariant: `pos <= buf.len()` after every read.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Reads one value of the descriptor's type, zero-extended to `u64`.
    ///
    /// On overrun the cursor is left where it was.
    pub fn read(&mut self, field: &FieldDescriptor) -> Result<u64, DecodeError> {
        let width = field.field_type.width();
        let end = self.pos + width;
        let bytes = self
            .buf
            .get(self.pos..end)
            .ok_or(DecodeError::Truncated {
                field: field.name,
                needed: end,
                available: self.buf.len(),
            })?;
        self.pos = end;
        Ok(assemble_le(field.field_type, bytes))
    }

    /// Moves the cursor back to a position returned by [`Cursor::position`].
    pub fn rewind_to(&mut self, mark: usize) {
        debug_assert!(mark <= self.pos, "rewind must not move forward");
        self.pos = mark.min(self.pos);
    }
}

fn assemble_le(field_type: FieldType, bytes: &[u8]) -> u64 {
    match field_type {
        FieldType::U8 => bytes[0] as u64,
        FieldType::U16 => u16::from_le_bytes([bytes[0], bytes[1]]) as u64,
        FieldType::U32 => u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as u64,
        FieldType::U64 => u64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]),
    }
}
