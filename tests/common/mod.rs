// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use nop_seo::attributes::{storage_key, ATTR_CANONICAL, ATTR_METADESC, ATTR_TITLE};
use nop_seo::bridge::{install_seo_fields, FieldBridge};
use nop_seo::config::SeoBridgeConfig;
use nop_seo::hooks::SeoHookRegistry;
use nop_seo::notice::AdminNoticeSink;
use nop_seo::registry::FieldRegistry;
use nop_seo::renderer::{RenderError, RenderTarget, SeoRenderer};
use nop_seo::resource::{EntityId, ResourceCatalog};
use nop_seo::store::{MetadataStore, StoreError};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, RwLock};

pub const SITE_NAME: &str = "Example Site";

/// Metadata store over a plain map, with an optional injected failure for
/// partial-write tests.
#[derive(Default)]
pub struct InMemoryMetadataStore {
    entries: RwLock<BTreeMap<(u64, String), String>>,
    failing_key: Mutex<Option<String>>,
}

impl InMemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, entity: EntityId, key: &str) -> Option<String> {
        self.entries
            .read()
            .expect("store lock")
            .get(&(entity.0, key.to_string()))
            .cloned()
    }

    pub fn entries_for(&self, entity: EntityId) -> BTreeMap<String, String> {
        self.entries
            .read()
            .expect("store lock")
            .iter()
            .filter(|((id, _), _)| *id == entity.0)
            .map(|((_, key), value)| (key.clone(), value.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().expect("store lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Makes every subsequent write to `key` fail.
    pub fn fail_on(&self, key: &str) {
        *self.failing_key.lock().expect("failing key lock") = Some(key.to_string());
    }
}

impl MetadataStore for InMemoryMetadataStore {
    fn set(&self, entity: EntityId, key: &str, value: &str) -> Result<(), StoreError> {
        if let Some(failing) = self.failing_key.lock().expect("failing key lock").as_deref() {
            if failing == key {
                return Err(StoreError::new(format!("injected failure for {}", key)));
            }
        }
        self.entries
            .write()
            .expect("store lock")
            .insert((entity.0, key.to_string()), value.to_string());
        Ok(())
    }
}

/// Renderer that layers stored attribute values into its output the way a
/// real SEO engine reads its own metadata back.
pub struct StoreBackedRenderer {
    store: Arc<InMemoryMetadataStore>,
    site_name: String,
}

impl StoreBackedRenderer {
    pub fn new(store: Arc<InMemoryMetadataStore>) -> Self {
        Self {
            store,
            site_name: SITE_NAME.to_string(),
        }
    }

    fn stored(&self, target: &RenderTarget, attribute: &str) -> Option<String> {
        self.store.get(target.entity_id(), &storage_key(attribute))
    }
}

impl SeoRenderer for StoreBackedRenderer {
    fn content_title(&self, target: &RenderTarget) -> Result<String, RenderError> {
        let base = self
            .stored(target, ATTR_TITLE)
            .unwrap_or_else(|| format!("Entry {}", target.entity_id()));
        Ok(format!("{} | {}", base, self.site_name))
    }

    fn taxonomy_title(&self, target: &RenderTarget) -> Result<String, RenderError> {
        Ok(format!("{} archive | {}", target, self.site_name))
    }

    fn meta_description(&self, target: &RenderTarget, _echo: bool) -> Result<String, RenderError> {
        Ok(self.stored(target, ATTR_METADESC).unwrap_or_default())
    }

    fn canonical_url(&self, target: &RenderTarget, _echo: bool) -> Result<String, RenderError> {
        Ok(self
            .stored(target, ATTR_CANONICAL)
            .unwrap_or_else(|| format!("https://example.com/?p={}", target.entity_id())))
    }
}

/// Renderer whose every call fails, for error propagation tests.
pub struct FailingRenderer;

impl SeoRenderer for FailingRenderer {
    fn content_title(&self, _target: &RenderTarget) -> Result<String, RenderError> {
        Err(RenderError::new("renderer offline"))
    }

    fn taxonomy_title(&self, _target: &RenderTarget) -> Result<String, RenderError> {
        Err(RenderError::new("renderer offline"))
    }

    fn meta_description(&self, _target: &RenderTarget, _echo: bool) -> Result<String, RenderError> {
        Err(RenderError::new("renderer offline"))
    }

    fn canonical_url(&self, _target: &RenderTarget, _echo: bool) -> Result<String, RenderError> {
        Err(RenderError::new("renderer offline"))
    }
}

#[derive(Default)]
pub struct RecordingNoticeSink {
    messages: Mutex<Vec<String>>,
}

impl RecordingNoticeSink {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("notice lock").clone()
    }
}

impl AdminNoticeSink for RecordingNoticeSink {
    fn warn(&self, message: &str) {
        self.messages
            .lock()
            .expect("notice lock")
            .push(message.to_string());
    }
}

pub struct StaticResourceCatalog {
    types: Vec<String>,
}

impl StaticResourceCatalog {
    pub fn new(types: &[&str]) -> Self {
        Self {
            types: types.iter().map(|name| name.to_string()).collect(),
        }
    }
}

impl ResourceCatalog for StaticResourceCatalog {
    fn public_custom_types(&self) -> Vec<String> {
        self.types.clone()
    }
}

pub struct BridgeHarness {
    pub registry: FieldRegistry,
    pub store: Arc<InMemoryMetadataStore>,
    pub hooks: Arc<SeoHookRegistry>,
    pub notices: RecordingNoticeSink,
    pub bridge: FieldBridge,
}

impl BridgeHarness {
    pub fn install() -> Self {
        Self::install_with(SeoBridgeConfig::default(), &[])
    }

    pub fn install_with(config: SeoBridgeConfig, custom_types: &[&str]) -> Self {
        let store = Arc::new(InMemoryMetadataStore::new());
        let renderer: Arc<dyn SeoRenderer> = Arc::new(StoreBackedRenderer::new(store.clone()));
        Self::install_parts(config, custom_types, store, renderer)
    }

    pub fn install_with_renderer(renderer: Arc<dyn SeoRenderer>) -> Self {
        let store = Arc::new(InMemoryMetadataStore::new());
        Self::install_parts(SeoBridgeConfig::default(), &[], store, renderer)
    }

    fn install_parts(
        config: SeoBridgeConfig,
        custom_types: &[&str],
        store: Arc<InMemoryMetadataStore>,
        renderer: Arc<dyn SeoRenderer>,
    ) -> Self {
        let hooks = Arc::new(SeoHookRegistry::new());
        let notices = RecordingNoticeSink::default();
        let catalog = StaticResourceCatalog::new(custom_types);
        let mut registry = FieldRegistry::new();
        let bridge = install_seo_fields(
            &mut registry,
            Some(renderer),
            store.clone(),
            hooks.clone(),
            &catalog,
            &notices,
            &config,
        )
        .expect("install seo fields")
        .expect("bridge installed");
        Self {
            registry,
            store,
            hooks,
            notices,
            bridge,
        }
    }
}

/// Resource representation in the shape the host API serializes.
pub fn api_representation(id: u64) -> Value {
    json!({ "id": id, "slug": format!("entry-{}", id) })
}

pub fn payload(entries: &[(&str, Value)]) -> Map<String, Value> {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}
