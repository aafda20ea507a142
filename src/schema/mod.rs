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

//! Field descriptors and the static table layouts built from them.
//!
//! A [`Schema`] is an ordered list of [`FieldDescriptor`]s describing one
//! firmware table layout. The end of the slice plays the role of the
//! end-of-table sentinel.

pub mod pm_metrics;
pub mod reg_state;

/// Primitive storage type of a field. All values are little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    U8,
    U16,
    U32,
    U64,
}

impl FieldType {
    /// Width of one value in bytes.
    pub const fn width(self) -> usize {
        match self {
            FieldType::U8 => 1,
            FieldType::U16 => 2,
            FieldType::U32 => 4,
            FieldType::U64 => 8,
        }
    }
}

/// Structural marker attached to a field.
///
/// Only the nested decoder interprets the structural markers. `Accumulator`
/// is metadata for consumers and never changes how a value is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFlag {
    None,
    /// Holds the number of instance blocks that follow the table header.
    NumInstance,
    /// Holds the number of SMN entries in the current instance.
    NumSmn,
    /// First field of every instance block.
    InstanceStart,
    /// First field of every SMN entry.
    SmnStart,
    /// Running total rather than an instantaneous sample.
    Accumulator,
}

/// Describes one scalar or fixed-size array field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub field_type: FieldType,
    pub array_size: usize,
    pub name: &'static str,
    pub flag: FieldFlag,
}

impl FieldDescriptor {
    pub const fn new(
        field_type: FieldType,
        array_size: usize,
        name: &'static str,
        flag: FieldFlag,
    ) -> Self {
        Self {
            field_type,
            array_size,
            name,
            flag,
        }
    }

    /// Plain scalar field.
    pub const fn scalar(field_type: FieldType, name: &'static str) -> Self {
        Self::new(field_type, 1, name, FieldFlag::None)
    }

    /// Plain fixed-size array field.
    pub const fn array(field_type: FieldType, array_size: usize, name: &'static str) -> Self {
        Self::new(field_type, array_size, name, FieldFlag::None)
    }

    /// Scalar field carrying a structural or metadata flag.
    pub const fn flagged(field_type: FieldType, name: &'static str, flag: FieldFlag) -> Self {
        Self::new(field_type, 1, name, flag)
    }

    /// Bytes occupied by every slot of this field.
    pub const fn size(&self) -> usize {
        self.field_type.width() * self.array_size
    }
}

/// One complete record layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    name: &'static str,
    fields: &'static [FieldDescriptor],
}

impl Schema {
    pub const fn new(name: &'static str, fields: &'static [FieldDescriptor]) -> Self {
        Self { name, fields }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &'static [FieldDescriptor] {
        self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Bytes needed to decode the schema once, top to bottom.
    pub fn flat_size(&self) -> usize {
        self.fields.iter().map(FieldDescriptor::size).sum()
    }

    /// Number of entries a flat decode produces.
    pub fn flat_entry_count(&self) -> usize {
        self.fields.iter().map(|f| f.array_size).sum()
    }

    /// Index of the first descriptor carrying `flag`.
    pub fn position_of(&self, flag: FieldFlag) -> Option<usize> {
        self.fields.iter().position(|f| f.flag == flag)
    }

    /// Checks the layout rules the nested decoder relies on: exactly one
    /// INSTANCE_START, and at most one SMN_START placed after it.
    pub fn is_valid_nested(&self) -> bool {
        let count = |flag| self.fields.iter().filter(|f| f.flag == flag).count();
        if count(FieldFlag::InstanceStart) != 1 || count(FieldFlag::SmnStart) > 1 {
            return false;
        }
        match (
            self.position_of(FieldFlag::InstanceStart),
            self.position_of(FieldFlag::SmnStart),
        ) {
            (Some(instance), Some(smn)) => smn > instance,
            (Some(_), None) => true,
            _ => false,
        }
    }

    /// Flag of the descriptor a decoded entry name came from.
    ///
    /// Array and block suffixes (`[i]`, `.instance[n]`, `.smn[m]`) are
    /// stripped before the lookup. Names that recur across blocks, such as
    /// `pad`, resolve to their first descriptor.
    pub fn flag_of(&self, entry_name: &str) -> Option<FieldFlag> {
        let base = base_name(entry_name);
        self.fields
            .iter()
            .find(|f| f.name == base)
            .map(|f| f.flag)
    }
}

/// Strips the positional suffixes a decoder appends to a field name.
pub fn base_name(entry_name: &str) -> &str {
    let end = entry_name.find(['[', '.']).unwrap_or(entry_name.len());
    &entry_name[..end]
}
