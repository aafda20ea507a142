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

use tracing::debug;

use super::cursor::Cursor;
use crate::error::DecodeError;
use crate::record::Record;
use crate::schema::Schema;

/// Decodes `buffer` against `schema` in a single top-to-bottom pass.
///
/// Array fields expand to `name[i]`. Flags are not interpreted. The first
/// overrun aborts the whole decode and the partial record is dropped.
pub fn decode_flat(buffer: &[u8], schema: &Schema) -> Result<Record, DecodeError> {
    let mut cursor = Cursor::new(buffer);
    let mut record = Record::new();

    for field in schema.fields() {
        for slot in 0..field.array_size {
            let value = cursor.read(field)?;
            let name = if field.array_size == 1 {
                field.name.to_string()
            } else {
                format!("{}[{slot}]", field.name)
            };
            record.push(name, value);
        }
    }

    debug!(
        "decoded {} entries from {} of {} bytes using schema {}",
        record.len(),
        cursor.position(),
        buffer.len(),
        schema.name()
    );
    Ok(record)
}
