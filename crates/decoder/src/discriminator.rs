// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Event discriminators: derivation from event names and prefix matching.

use crate::schema::{EventDef, LoadError, SchemaModel};
use sha2::{Digest, Sha256};

/// Discriminator width used by Anchor.
pub const ANCHOR_DISCRIMINATOR_LEN: usize = 8;

/// Namespace Anchor hashes in front of event names.
const EVENT_NAMESPACE: &str = "event:";

/// Derive an event discriminator the way Anchor does: the first `len` bytes
/// of `sha256("event:<name>")`.
pub fn event_discriminator(name: &str, len: usize) -> Result<Vec<u8>, LoadError> {
    let digest = Sha256::new()
        .chain_update(EVENT_NAMESPACE.as_bytes())
        .chain_update(name.as_bytes())
        .finalize();

    if len == 0 || len > digest.len() {
        return Err(LoadError::MalformedSchema(format!(
            "discriminator length must be between 1 and {}, got {}",
            digest.len(),
            len
        )));
    }

    Ok(digest[..len].to_vec())
}

/// Matches buffer prefixes against the declared events of a schema.
///
/// Candidates are tried in declaration order, so when two events share a
/// discriminator the first one declared always wins.
#[derive(Debug, Clone, Copy)]
pub struct DiscriminatorResolver<'s> {
    events: &'s [EventDef],
    min_len: usize,
}

impl<'s> DiscriminatorResolver<'s> {
    pub fn new(schema: &'s SchemaModel) -> Self {
        Self {
            events: schema.events(),
            min_len: schema.min_discriminator_len(),
        }
    }

    /// Return the first event whose discriminator is a prefix of `buffer`.
    ///
    /// A buffer shorter than every discriminator never matches.
    pub fn match_prefix(&self, buffer: &[u8]) -> Option<&'s EventDef> {
        if self.events.is_empty() || buffer.len() < self.min_len {
            return None;
        }

        self.events
            .iter()
            .find(|event| buffer.starts_with(event.discriminator()))
    }
}
