// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::resource::EntityId;
use std::error::Error;
use std::fmt;

/// The resource a renderer call is scoped to. Every renderer method takes
/// the target explicitly; no ambient "current resource" state is involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    Content(EntityId),
    Category(EntityId),
    Term(EntityId),
}

impl RenderTarget {
    pub fn entity_id(&self) -> EntityId {
        match self {
            RenderTarget::Content(id) | RenderTarget::Category(id) | RenderTarget::Term(id) => {
                *id
            }
        }
    }
}

impl fmt::Display for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderTarget::Content(id) => write!(f, "content {}", id),
            RenderTarget::Category(id) => write!(f, "category {}", id),
            RenderTarget::Term(id) => write!(f, "term {}", id),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderError {
    message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for RenderError {}

/// Rendering surface of the SEO engine.
///
/// All methods return their value instead of printing it. `echo` reports
/// whether the engine would have emitted the value inline when serving a
/// page itself; engines that draw no distinction may ignore it.
pub trait SeoRenderer: Send + Sync {
    fn content_title(&self, target: &RenderTarget) -> Result<String, RenderError>;

    fn taxonomy_title(&self, target: &RenderTarget) -> Result<String, RenderError>;

    fn meta_description(&self, target: &RenderTarget, echo: bool) -> Result<String, RenderError>;

    fn canonical_url(&self, target: &RenderTarget, echo: bool) -> Result<String, RenderError>;
}
