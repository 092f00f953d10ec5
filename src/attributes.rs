// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

/// Attribute keys accepted on write, in canonical persistence order.
/// Values for any other key are never written to the metadata store.
pub const SEO_ATTRIBUTE_KEYS: [&str; 16] = [
    "yoast_wpseo_focuskw",
    "yoast_wpseo_title",
    "yoast_wpseo_metadesc",
    "yoast_wpseo_linkdex",
    "yoast_wpseo_metakeywords",
    "yoast_wpseo_meta-robots-noindex",
    "yoast_wpseo_meta-robots-nofollow",
    "yoast_wpseo_meta-robots-adv",
    "yoast_wpseo_canonical",
    "yoast_wpseo_redirect",
    "yoast_wpseo_opengraph-title",
    "yoast_wpseo_opengraph-description",
    "yoast_wpseo_opengraph-image",
    "yoast_wpseo_twitter-title",
    "yoast_wpseo_twitter-description",
    "yoast_wpseo_twitter-image",
];

pub const ATTR_TITLE: &str = "yoast_wpseo_title";
pub const ATTR_METADESC: &str = "yoast_wpseo_metadesc";
pub const ATTR_CANONICAL: &str = "yoast_wpseo_canonical";

pub fn is_seo_attribute(key: &str) -> bool {
    SEO_ATTRIBUTE_KEYS.contains(&key)
}

/// Key an attribute is persisted under: the attribute name with a single
/// underscore prefix.
pub fn storage_key(attribute: &str) -> String {
    format!("_{}", attribute)
}
