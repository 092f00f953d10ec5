// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::resource::EntityId;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone)]
pub struct StoreError {
    message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for StoreError {}

/// Per-entity key/value persistence owned by the host platform. The bridge
/// only ever writes; reads happen inside the SEO engine's renderer.
pub trait MetadataStore: Send + Sync {
    fn set(&self, entity: EntityId, key: &str, value: &str) -> Result<(), StoreError>;
}
