// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build identifier generation

use uuid::Uuid;

/// Generate a short build identifier (first uuid segment)
///
/// Used when the caller does not supply a build number of its own.
pub fn short_build_id() -> String {
    let id = Uuid::new_v4().to_string();
    id.split('-').next().unwrap_or(&id).to_string()
}
