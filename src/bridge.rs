// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::attributes::{
    storage_key, ATTR_CANONICAL, ATTR_METADESC, ATTR_TITLE, SEO_ATTRIBUTE_KEYS,
};
use crate::config::{ConfigError, SeoBridgeConfig};
use crate::hooks::{FilterError, SeoHookRegistry};
use crate::notice::{AdminNoticeSink, SEO_ENGINE_MISSING_NOTICE};
use crate::record::SeoMetaRecord;
use crate::registry::{
    FieldError, FieldErrorKind, FieldHandlers, FieldReadHandler, FieldRegistry, FieldWriteHandler,
    RegistryError,
};
use crate::renderer::{RenderError, RenderTarget, SeoRenderer};
use crate::resource::{
    builtin_resource_types, extract_entity_id, EntityId, EntityRefError, FieldRequest,
    ResourceCatalog, ResourceKind, ResourceType,
};
use crate::store::{MetadataStore, StoreError};
use log::{debug, info, warn};
use serde_json::{json, Map, Value};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

#[derive(Debug)]
pub enum BridgeError {
    EntityRef(EntityRefError),
    Render(RenderError),
    Store(StoreError),
    Filter(FilterError),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::EntityRef(err) => write!(f, "entity reference rejected: {}", err),
            BridgeError::Render(err) => write!(f, "seo renderer failed: {}", err),
            BridgeError::Store(err) => write!(f, "metadata store write failed: {}", err),
            BridgeError::Filter(err) => write!(f, "meta filter failed: {}", err),
        }
    }
}

impl Error for BridgeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BridgeError::EntityRef(err) => Some(err),
            BridgeError::Render(err) => Some(err),
            BridgeError::Store(err) => Some(err),
            BridgeError::Filter(err) => Some(err),
        }
    }
}

impl From<EntityRefError> for BridgeError {
    fn from(err: EntityRefError) -> Self {
        BridgeError::EntityRef(err)
    }
}

impl From<RenderError> for BridgeError {
    fn from(err: RenderError) -> Self {
        BridgeError::Render(err)
    }
}

impl From<StoreError> for BridgeError {
    fn from(err: StoreError) -> Self {
        BridgeError::Store(err)
    }
}

impl From<FilterError> for BridgeError {
    fn from(err: FilterError) -> Self {
        BridgeError::Filter(err)
    }
}

impl FieldError for BridgeError {
    fn kind(&self) -> FieldErrorKind {
        match self {
            BridgeError::EntityRef(_) => FieldErrorKind::Validation,
            BridgeError::Render(_) => FieldErrorKind::Render,
            BridgeError::Store(_) => FieldErrorKind::Store,
            BridgeError::Filter(_) => FieldErrorKind::Filter,
        }
    }
}

impl From<BridgeError> for Box<dyn FieldError> {
    fn from(err: BridgeError) -> Self {
        Box::new(err)
    }
}

#[derive(Debug)]
pub enum InstallError {
    Config(ConfigError),
    Registry(RegistryError),
}

impl fmt::Display for InstallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallError::Config(err) => write!(f, "seo field install failed: {}", err),
            InstallError::Registry(err) => write!(f, "seo field install failed: {}", err),
        }
    }
}

impl Error for InstallError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            InstallError::Config(err) => Some(err),
            InstallError::Registry(err) => Some(err),
        }
    }
}

impl From<ConfigError> for InstallError {
    fn from(err: ConfigError) -> Self {
        InstallError::Config(err)
    }
}

impl From<RegistryError> for InstallError {
    fn from(err: RegistryError) -> Self {
        InstallError::Registry(err)
    }
}

/// Computes and persists the virtual SEO field. One instance backs every
/// registered resource type; all state lives in the shared collaborators.
#[derive(Clone)]
pub struct FieldBridge {
    renderer: Arc<dyn SeoRenderer>,
    store: Arc<dyn MetadataStore>,
    hooks: Arc<SeoHookRegistry>,
}

impl FieldBridge {
    pub fn new(
        renderer: Arc<dyn SeoRenderer>,
        store: Arc<dyn MetadataStore>,
        hooks: Arc<SeoHookRegistry>,
    ) -> Self {
        Self {
            renderer,
            store,
            hooks,
        }
    }

    /// Computes the field value for a content-like resource: title, meta
    /// description and canonical URL, then the content filter chain.
    pub fn read_content_meta(
        &self,
        id: EntityId,
        representation: Option<&Value>,
        request: Option<&FieldRequest>,
    ) -> Result<SeoMetaRecord, BridgeError> {
        let target = RenderTarget::Content(id);
        let mut record = SeoMetaRecord::new();
        record.insert(ATTR_TITLE, self.renderer.content_title(&target)?);
        record.insert(ATTR_METADESC, self.renderer.meta_description(&target, false)?);
        record.insert(ATTR_CANONICAL, self.renderer.canonical_url(&target, false)?);

        // Filters always receive a representation. A recompute after a
        // write only has the id, so it hands over the minimal one.
        let record = match representation {
            Some(representation) => {
                self.hooks.apply_meta_filters(record, representation, request)?
            }
            None => {
                let minimal = minimal_representation(id);
                self.hooks.apply_meta_filters(record, &minimal, request)?
            }
        };
        debug!("computed seo meta for {}", target);
        Ok(record)
    }

    /// Computes the field value for a taxonomy-like resource. No canonical
    /// URL is rendered for archives.
    pub fn read_taxonomy_meta(&self, target: RenderTarget) -> Result<SeoMetaRecord, BridgeError> {
        let mut record = SeoMetaRecord::new();
        record.insert(ATTR_TITLE, self.renderer.taxonomy_title(&target)?);
        record.insert(ATTR_METADESC, self.renderer.meta_description(&target, false)?);
        let record = self.hooks.apply_taxonomy_meta_filters(record)?;
        debug!("computed seo meta for {}", target);
        Ok(record)
    }

    /// Persists allow-listed attributes from an incoming field payload,
    /// then recomputes the field so the caller sees rendered values, not
    /// an echo of its input.
    ///
    /// Keys outside the allow-list, empty values and non-scalar values are
    /// skipped. Writes are applied one by one; a store failure leaves the
    /// attributes written so far in place.
    pub fn write_meta(
        &self,
        payload: &Map<String, Value>,
        representation: &Value,
    ) -> Result<SeoMetaRecord, BridgeError> {
        let id = extract_entity_id(representation)?;
        let mut written = 0;
        for attribute in SEO_ATTRIBUTE_KEYS {
            let Some(incoming) = payload.get(attribute) else {
                continue;
            };
            match scalar_text(incoming) {
                Some(text) if text.is_empty() => {}
                Some(text) => {
                    self.store.set(id, &storage_key(attribute), &text)?;
                    written += 1;
                }
                None => debug!("ignoring non-scalar value for seo attribute {}", attribute),
            }
        }
        debug!("wrote {} seo attribute(s) for entity {}", written, id);
        self.read_content_meta(id, None, None)
    }
}

/// Wires the virtual SEO field into the registry for every applicable
/// resource type.
///
/// Without a renderer there is nothing to compute, so registration is
/// skipped entirely and an admin notice is raised; the host keeps serving
/// resources without the field. Returns the bridge when installed.
pub fn install_seo_fields(
    registry: &mut FieldRegistry,
    renderer: Option<Arc<dyn SeoRenderer>>,
    store: Arc<dyn MetadataStore>,
    hooks: Arc<SeoHookRegistry>,
    catalog: &dyn ResourceCatalog,
    notices: &dyn AdminNoticeSink,
    config: &SeoBridgeConfig,
) -> Result<Option<FieldBridge>, InstallError> {
    config.validate()?;

    let renderer = match renderer {
        Some(renderer) => renderer,
        None => {
            warn!("seo field registration skipped: no SEO engine renderer available");
            notices.warn(SEO_ENGINE_MISSING_NOTICE);
            return Ok(None);
        }
    };

    let bridge = FieldBridge::new(renderer, store, hooks);

    let mut resource_types = builtin_resource_types();
    if config.include_custom_types {
        for name in catalog.public_custom_types() {
            if resource_types.iter().any(|existing| existing.name() == name) {
                debug!("custom resource type {} already covered; skipping", name);
                continue;
            }
            resource_types.push(ResourceType::content(name));
        }
    }

    for resource_type in &resource_types {
        register_field_for(registry, resource_type, &config.field_name, &bridge)?;
        debug!(
            "registered seo field {} for resource type {}",
            config.field_name,
            resource_type.name()
        );
    }
    info!(
        "seo field {} registered for {} resource types",
        config.field_name,
        resource_types.len()
    );

    Ok(Some(bridge))
}

fn register_field_for(
    registry: &mut FieldRegistry,
    resource_type: &ResourceType,
    field_name: &str,
    bridge: &FieldBridge,
) -> Result<(), RegistryError> {
    let read = match resource_type.kind() {
        ResourceKind::Content => content_read_handler(bridge.clone()),
        ResourceKind::Category => taxonomy_read_handler(bridge.clone(), RenderTarget::Category),
        ResourceKind::Term => taxonomy_read_handler(bridge.clone(), RenderTarget::Term),
    };
    let write = resource_type
        .kind()
        .supports_write()
        .then(|| content_write_handler(bridge.clone()));
    registry.register_field(
        resource_type.name(),
        field_name,
        FieldHandlers {
            read,
            write,
            schema: None,
        },
    )
}

fn content_read_handler(bridge: FieldBridge) -> FieldReadHandler {
    Arc::new(move |representation, _field_name, request| {
        let id = extract_entity_id(representation).map_err(BridgeError::from)?;
        Ok(bridge.read_content_meta(id, Some(representation), request)?)
    })
}

fn taxonomy_read_handler(
    bridge: FieldBridge,
    target: fn(EntityId) -> RenderTarget,
) -> FieldReadHandler {
    Arc::new(move |representation, _field_name, _request| {
        let id = extract_entity_id(representation).map_err(BridgeError::from)?;
        Ok(bridge.read_taxonomy_meta(target(id))?)
    })
}

fn content_write_handler(bridge: FieldBridge) -> FieldWriteHandler {
    Arc::new(move |payload, representation, _field_name| {
        Ok(bridge.write_meta(payload, representation)?)
    })
}

fn minimal_representation(id: EntityId) -> Value {
    json!({ "id": id.0 })
}

/// Text form an incoming attribute value is persisted as. `None` for
/// arrays and objects, which have no canonical text form.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
