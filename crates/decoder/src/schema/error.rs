// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

/// The IDL cannot be turned into a usable schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("Malformed schema: {0}")]
    MalformedSchema(String),

    #[error("Unresolved type reference: {0}")]
    UnresolvedReference(String),
}

impl LoadError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedSchema(msg.into())
    }
}
