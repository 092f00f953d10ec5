// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

/// Shown once at startup when field registration is skipped because no
/// SEO engine renderer is available.
pub const SEO_ENGINE_MISSING_NOTICE: &str =
    "SEO meta fields are unavailable because the SEO engine plugin is not active.";

/// Operator-facing notice surface of the host's admin area.
pub trait AdminNoticeSink: Send + Sync {
    fn warn(&self, message: &str);
}
