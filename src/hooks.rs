// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::record::SeoMetaRecord;
use crate::resource::FieldRequest;
use log::warn;
use serde_json::Value;
use std::error::Error;
use std::fmt;
use std::sync::RwLock;

/// Public name of the content meta filter chain.
pub const SEO_META_FILTER: &str = "seo_meta_filter";
/// Public name of the taxonomy meta filter chain.
pub const SEO_TAXONOMY_META_FILTER: &str = "seo_taxonomy_meta_filter";

#[derive(Debug, Clone)]
pub struct FilterError {
    message: String,
}

impl FilterError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for FilterError {}

/// Filter applied to the record computed for a content-like resource.
/// Receives the partial resource representation and, when the read came in
/// over the API, the request parameters.
pub type SeoMetaFilter = Box<
    dyn Fn(SeoMetaRecord, &Value, Option<&FieldRequest>) -> Result<SeoMetaRecord, FilterError>
        + Send
        + Sync,
>;

/// Filter applied to the record computed for a taxonomy-like resource.
pub type SeoTaxonomyMetaFilter =
    Box<dyn Fn(SeoMetaRecord) -> Result<SeoMetaRecord, FilterError> + Send + Sync>;

/// Holds the two filter chains third parties can subscribe to. Filters run
/// in registration order over the same record, so a later filter sees and
/// may replace what an earlier one produced. The first failing filter
/// aborts the chain.
pub struct SeoHookRegistry {
    meta_filters: RwLock<Vec<SeoMetaFilter>>,
    taxonomy_filters: RwLock<Vec<SeoTaxonomyMetaFilter>>,
}

impl SeoHookRegistry {
    pub fn new() -> Self {
        Self {
            meta_filters: RwLock::new(Vec::new()),
            taxonomy_filters: RwLock::new(Vec::new()),
        }
    }

    pub fn register_meta_filter<F>(&self, filter: F)
    where
        F: Fn(SeoMetaRecord, &Value, Option<&FieldRequest>) -> Result<SeoMetaRecord, FilterError>
            + Send
            + Sync
            + 'static,
    {
        match self.meta_filters.write() {
            Ok(mut filters) => filters.push(Box::new(filter)),
            Err(_) => warn!("{} chain lock poisoned; registration skipped", SEO_META_FILTER),
        }
    }

    pub fn register_taxonomy_meta_filter<F>(&self, filter: F)
    where
        F: Fn(SeoMetaRecord) -> Result<SeoMetaRecord, FilterError> + Send + Sync + 'static,
    {
        match self.taxonomy_filters.write() {
            Ok(mut filters) => filters.push(Box::new(filter)),
            Err(_) => warn!(
                "{} chain lock poisoned; registration skipped",
                SEO_TAXONOMY_META_FILTER
            ),
        }
    }

    pub fn apply_meta_filters(
        &self,
        record: SeoMetaRecord,
        representation: &Value,
        request: Option<&FieldRequest>,
    ) -> Result<SeoMetaRecord, FilterError> {
        let filters = match self.meta_filters.read() {
            Ok(filters) => filters,
            Err(_) => {
                warn!("{} chain lock poisoned; filters skipped", SEO_META_FILTER);
                return Ok(record);
            }
        };
        let mut record = record;
        for filter in filters.iter() {
            record = filter(record, representation, request)?;
        }
        Ok(record)
    }

    pub fn apply_taxonomy_meta_filters(
        &self,
        record: SeoMetaRecord,
    ) -> Result<SeoMetaRecord, FilterError> {
        let filters = match self.taxonomy_filters.read() {
            Ok(filters) => filters,
            Err(_) => {
                warn!(
                    "{} chain lock poisoned; filters skipped",
                    SEO_TAXONOMY_META_FILTER
                );
                return Ok(record);
            }
        };
        let mut record = record;
        for filter in filters.iter() {
            record = filter(record)?;
        }
        Ok(record)
    }
}

impl Default for SeoHookRegistry {
    fn default() -> Self {
        Self::new()
    }
}
