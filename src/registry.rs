// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::record::SeoMetaRecord;
use crate::resource::FieldRequest;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Broad classification of a field handler failure, for callers that map
/// errors onto transport responses without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    Validation,
    Render,
    Store,
    Filter,
}

/// Error contract for field handlers. Handlers from different extensions
/// surface different error types; the registry only needs a kind and a
/// printable message.
pub trait FieldError: fmt::Debug + fmt::Display + Send + Sync + 'static {
    fn kind(&self) -> FieldErrorKind;
}

pub type FieldResult<T> = Result<T, Box<dyn FieldError>>;

/// Read callback: (resource representation, field name, request).
pub type FieldReadHandler = Arc<
    dyn Fn(&Value, Option<&str>, Option<&FieldRequest>) -> FieldResult<SeoMetaRecord>
        + Send
        + Sync,
>;

/// Write callback: (incoming field payload, resource representation, field name).
pub type FieldWriteHandler = Arc<
    dyn Fn(&Map<String, Value>, &Value, Option<&str>) -> FieldResult<SeoMetaRecord> + Send + Sync,
>;

/// One registered virtual field. `write` is absent for read-only fields;
/// `schema` is optional and surfaced to hosts that publish field schemas.
pub struct FieldHandlers {
    pub read: FieldReadHandler,
    pub write: Option<FieldWriteHandler>,
    pub schema: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct FieldKey {
    resource_type: String,
    field_name: String,
}

impl FieldKey {
    fn new(resource_type: &str, field_name: &str) -> Self {
        Self {
            resource_type: resource_type.to_string(),
            field_name: field_name.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum RegistryError {
    DuplicateField {
        resource_type: String,
        field_name: String,
    },
    NotRegistered {
        resource_type: String,
        field_name: String,
    },
    ReadOnlyField {
        resource_type: String,
        field_name: String,
    },
    Field(Box<dyn FieldError>),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateField {
                resource_type,
                field_name,
            } => write!(
                f,
                "field '{}' is already registered for resource type '{}'",
                field_name, resource_type
            ),
            RegistryError::NotRegistered {
                resource_type,
                field_name,
            } => write!(
                f,
                "no field '{}' registered for resource type '{}'",
                field_name, resource_type
            ),
            RegistryError::ReadOnlyField {
                resource_type,
                field_name,
            } => write!(
                f,
                "field '{}' on resource type '{}' does not accept writes",
                field_name, resource_type
            ),
            RegistryError::Field(err) => write!(f, "field handler failed: {}", err),
        }
    }
}

impl Error for RegistryError {}

impl From<Box<dyn FieldError>> for RegistryError {
    fn from(err: Box<dyn FieldError>) -> Self {
        RegistryError::Field(err)
    }
}

/// Virtual-field extension point of the host API layer.
///
/// Hosts build the registry during startup, then dispatch reads and writes
/// through it while serving resource representations. A (resource type,
/// field name) pair registers at most once.
pub struct FieldRegistry {
    fields: BTreeMap<FieldKey, FieldHandlers>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    pub fn register_field(
        &mut self,
        resource_type: &str,
        field_name: &str,
        handlers: FieldHandlers,
    ) -> Result<(), RegistryError> {
        let key = FieldKey::new(resource_type, field_name);
        if self.fields.contains_key(&key) {
            return Err(RegistryError::DuplicateField {
                resource_type: resource_type.to_string(),
                field_name: field_name.to_string(),
            });
        }
        self.fields.insert(key, handlers);
        Ok(())
    }

    pub fn dispatch_read(
        &self,
        resource_type: &str,
        field_name: &str,
        representation: &Value,
        request: Option<&FieldRequest>,
    ) -> Result<SeoMetaRecord, RegistryError> {
        let handlers = self.lookup(resource_type, field_name)?;
        let record = (handlers.read)(representation, Some(field_name), request)?;
        Ok(record)
    }

    pub fn dispatch_write(
        &self,
        resource_type: &str,
        field_name: &str,
        payload: &Map<String, Value>,
        representation: &Value,
    ) -> Result<SeoMetaRecord, RegistryError> {
        let handlers = self.lookup(resource_type, field_name)?;
        let write = handlers
            .write
            .as_ref()
            .ok_or_else(|| RegistryError::ReadOnlyField {
                resource_type: resource_type.to_string(),
                field_name: field_name.to_string(),
            })?;
        let record = write(payload, representation, Some(field_name))?;
        Ok(record)
    }

    pub fn is_registered(&self, resource_type: &str, field_name: &str) -> bool {
        self.fields
            .contains_key(&FieldKey::new(resource_type, field_name))
    }

    /// `None` when the pair is not registered at all.
    pub fn is_writable(&self, resource_type: &str, field_name: &str) -> Option<bool> {
        self.fields
            .get(&FieldKey::new(resource_type, field_name))
            .map(|handlers| handlers.write.is_some())
    }

    pub fn registration(&self, resource_type: &str, field_name: &str) -> Option<&FieldHandlers> {
        self.fields.get(&FieldKey::new(resource_type, field_name))
    }

    /// Registered (resource type, field name) pairs in key order.
    pub fn registered_fields(&self) -> Vec<(String, String)> {
        self.fields
            .keys()
            .map(|key| (key.resource_type.clone(), key.field_name.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn lookup(
        &self,
        resource_type: &str,
        field_name: &str,
    ) -> Result<&FieldHandlers, RegistryError> {
        self.fields
            .get(&FieldKey::new(resource_type, field_name))
            .ok_or_else(|| RegistryError::NotRegistered {
                resource_type: resource_type.to_string(),
                field_name: field_name.to_string(),
            })
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug)]
    struct StubError;

    impl fmt::Display for StubError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "stub handler error")
        }
    }

    impl FieldError for StubError {
        fn kind(&self) -> FieldErrorKind {
            FieldErrorKind::Validation
        }
    }

    fn stub_handlers(writable: bool) -> FieldHandlers {
        let read: FieldReadHandler = Arc::new(|_, _, _| {
            let mut record = SeoMetaRecord::new();
            record.insert("yoast_wpseo_title", "stub");
            Ok(record)
        });
        let write: Option<FieldWriteHandler> = if writable {
            Some(Arc::new(|_, _, _| Ok(SeoMetaRecord::new())))
        } else {
            None
        };
        FieldHandlers {
            read,
            write,
            schema: None,
        }
    }

    #[test]
    fn rejects_duplicate_registration() {
        let mut registry = FieldRegistry::new();
        registry
            .register_field("article", "seo_meta", stub_handlers(true))
            .unwrap();
        let second = registry.register_field("article", "seo_meta", stub_handlers(true));
        assert!(matches!(
            second,
            Err(RegistryError::DuplicateField { .. })
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn same_field_registers_for_distinct_types() {
        let mut registry = FieldRegistry::new();
        registry
            .register_field("article", "seo_meta", stub_handlers(true))
            .unwrap();
        registry
            .register_field("page", "seo_meta", stub_handlers(true))
            .unwrap();
        assert_eq!(
            registry.registered_fields(),
            vec![
                ("article".to_string(), "seo_meta".to_string()),
                ("page".to_string(), "seo_meta".to_string()),
            ]
        );
    }

    #[test]
    fn dispatch_read_requires_a_registration() {
        let registry = FieldRegistry::new();
        let result = registry.dispatch_read("article", "seo_meta", &json!({ "id": 1 }), None);
        assert!(matches!(result, Err(RegistryError::NotRegistered { .. })));
    }

    #[test]
    fn dispatch_write_rejects_read_only_fields() {
        let mut registry = FieldRegistry::new();
        registry
            .register_field("category", "seo_meta", stub_handlers(false))
            .unwrap();
        let payload = Map::new();
        let result = registry.dispatch_write("category", "seo_meta", &payload, &json!({ "id": 2 }));
        assert!(matches!(result, Err(RegistryError::ReadOnlyField { .. })));
        assert_eq!(registry.is_writable("category", "seo_meta"), Some(false));
    }

    #[test]
    fn handler_errors_keep_their_kind() {
        let mut registry = FieldRegistry::new();
        let read: FieldReadHandler = Arc::new(|_, _, _| Err(Box::new(StubError)));
        registry
            .register_field(
                "article",
                "seo_meta",
                FieldHandlers {
                    read,
                    write: None,
                    schema: None,
                },
            )
            .unwrap();
        let err = registry
            .dispatch_read("article", "seo_meta", &json!({ "id": 1 }), None)
            .unwrap_err();
        match err {
            RegistryError::Field(inner) => assert_eq!(inner.kind(), FieldErrorKind::Validation),
            other => panic!("unexpected error: {}", other),
        }
    }
}
