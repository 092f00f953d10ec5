// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the SEO field is computed and keyed for a resource type.
///
/// `Content` resources render with the content title pipeline and accept
/// writes. `Category` and `Term` resources render with the taxonomy title
/// pipeline and stay read-only; the variant picks which archive scope the
/// renderer is pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Content,
    Category,
    Term,
}

impl ResourceKind {
    pub fn supports_write(self) -> bool {
        matches!(self, ResourceKind::Content)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceType {
    name: String,
    kind: ResourceKind,
}

impl ResourceType {
    pub fn new(name: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn content(name: impl Into<String>) -> Self {
        Self::new(name, ResourceKind::Content)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }
}

/// The resource types every installation exposes, with the kind each one
/// is served as. Product listings key their archive by term, so they stay
/// on the taxonomy pipeline even though products otherwise behave like
/// content.
pub const BUILTIN_RESOURCE_TYPES: [(&str, ResourceKind); 6] = [
    ("article", ResourceKind::Content),
    ("page", ResourceKind::Content),
    ("category", ResourceKind::Category),
    ("tag", ResourceKind::Term),
    ("product", ResourceKind::Term),
    ("term", ResourceKind::Content),
];

pub fn builtin_resource_types() -> Vec<ResourceType> {
    BUILTIN_RESOURCE_TYPES
        .iter()
        .map(|(name, kind)| ResourceType::new(*name, *kind))
        .collect()
}

/// Reports resource types the host exposes publicly beyond the built-in
/// set. Each reported name is registered as a content-like type.
pub trait ResourceCatalog: Send + Sync {
    fn public_custom_types(&self) -> Vec<String>;
}

/// Request-scoped parameters the host forwards to read callbacks and on
/// into the content filter chain. Opaque to the bridge itself.
#[derive(Debug, Clone, Default)]
pub struct FieldRequest {
    params: BTreeMap<String, String>,
}

impl FieldRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityRefError {
    MissingId,
    InvalidId(String),
}

impl fmt::Display for EntityRefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRefError::MissingId => {
                write!(f, "resource representation carries no id member")
            }
            EntityRefError::InvalidId(raw) => {
                write!(f, "resource id is not a non-negative integer: {}", raw)
            }
        }
    }
}

impl Error for EntityRefError {}

/// Resolves the numeric entity id from a resource representation.
///
/// Both shapes a host hands out are accepted: the API object with a
/// lowercase `id` member and the raw entity with an uppercase `ID`. The
/// API shape wins when both are present. Anything else is rejected rather
/// than guessed at.
pub fn extract_entity_id(representation: &Value) -> Result<EntityId, EntityRefError> {
    let members = representation
        .as_object()
        .ok_or(EntityRefError::MissingId)?;
    let raw = members
        .get("id")
        .or_else(|| members.get("ID"))
        .ok_or(EntityRefError::MissingId)?;
    match raw.as_u64() {
        Some(id) => Ok(EntityId(id)),
        None => Err(EntityRefError::InvalidId(raw.to_string())),
    }
}
