// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod attributes;
pub mod bridge;
pub mod config;
pub mod hooks;
pub mod notice;
pub mod record;
pub mod registry;
pub mod renderer;
pub mod resource;
pub mod store;
