// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// The computed value of the virtual SEO field for one resource.
///
/// Keys are attribute names, values are whatever the renderer or a
/// registered filter produced. Serializes as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeoMetaRecord(BTreeMap<String, Value>);

impl SeoMetaRecord {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for SeoMetaRecord {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(entries: I) -> Self {
        Self(entries.into_iter().collect())
    }
}

impl From<SeoMetaRecord> for Value {
    fn from(record: SeoMetaRecord) -> Self {
        Value::Object(record.0.into_iter().collect())
    }
}
