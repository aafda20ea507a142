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

use serde::Serialize;

use crate::common::config::AppConfig;

/// One decoded `(name, value)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub name: String,
    pub value: u64,
}

/// Ordered result of decoding one table.
///
/// Order follows the schema and the repetition order of arrays and nested
/// blocks. Names may repeat; use [`Record::get`] only for names known to be
/// unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record {
    entries: Vec<Entry>,
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

impl Record {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(AppConfig::RECORD_INITIAL_CAPACITY),
        }
    }

    pub(crate) fn push(&mut self, name: String, value: u64) {
        if self.entries.len() == self.entries.capacity() {
            self.entries.reserve_exact(AppConfig::RECORD_GROWTH);
        }
        self.entries.push(Entry { name, value });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Value of the first entry called `name`.
    pub fn get(&self, name: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.value)
    }

    /// Entries as plain `(name, value)` tuples.
    pub fn to_pairs(&self) -> Vec<(&str, u64)> {
        self.entries
            .iter()
            .map(|entry| (entry.name.as_str(), entry.value))
            .collect()
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Record {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
