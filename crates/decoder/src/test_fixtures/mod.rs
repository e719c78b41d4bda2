// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! IDL documents, captured payloads and a payload builder for tests.

use crate::discriminator::{ANCHOR_DISCRIMINATOR_LEN, event_discriminator};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Anchor 0.30 style IDL with a single `TokensMinted` event.
pub const MINT_PROGRAM_IDL: &str = include_str!("mint_program.json");

/// Legacy IDL with inline camelCase event fields and no discriminators.
pub const RED_PACKET_IDL: &str = include_str!("red_packet.json");

/// IDL exercising enums, options, sequences, arrays and a recursive type.
pub const GOVERNANCE_IDL: &str = include_str!("governance.json");

/// `TokensMinted` emitted on devnet: amount 1_000_000_000.
pub const TOKENS_MINTED_B64: &str =
    "z9SAwq82QBj+3IpPa0HkkpmKfkG3WK8wlTzndXObrCaA7heJvHcd1+oQbIkb9bmKHsDnwJxWUyBnm5Pvct1JlonJ3IzxrTZ9AMqaOwAAAAA=";

/// `RedPacketClaimed` emitted on devnet: amount 92224386, red packet id 3.
pub const RED_PACKET_CLAIMED_B64: &str = "Xs7iLxWdjiShzDaypJkWGPKlkF8s+ulolgSTLE9J3bPohqDdyvLQRZeWqxGnamM2a8s9ope4AjuudIfKT0qUc4bBmCuD4JXbgjt/BQAAAAADAAAAAAAAAA==";

pub fn tokens_minted_payload() -> Vec<u8> {
    STANDARD.decode(TOKENS_MINTED_B64).unwrap()
}

pub fn red_packet_claimed_payload() -> Vec<u8> {
    STANDARD.decode(RED_PACKET_CLAIMED_B64).unwrap()
}

/// Assembles little-endian event payloads field by field.
#[derive(Debug, Default)]
pub struct PayloadBuilder {
    buf: Vec<u8>,
}

impl PayloadBuilder {
    /// Start with the Anchor discriminator of `name`.
    pub fn event(name: &str) -> Self {
        Self::with_discriminator(&event_discriminator(name, ANCHOR_DISCRIMINATOR_LEN).unwrap())
    }

    pub fn with_discriminator(discriminator: &[u8]) -> Self {
        Self {
            buf: discriminator.to_vec(),
        }
    }

    pub fn u8(mut self, v: u8) -> Self {
        self.buf.push(v);
        self
    }

    pub fn u16(mut self, v: u16) -> Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn u32(mut self, v: u32) -> Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn u64(mut self, v: u64) -> Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn i64(mut self, v: i64) -> Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn bool(self, v: bool) -> Self {
        self.u8(v.into())
    }

    pub fn pubkey(mut self, key: [u8; 32]) -> Self {
        self.buf.extend_from_slice(&key);
        self
    }

    pub fn string(self, s: &str) -> Self {
        self.u32(s.len() as u32).bytes(s.as_bytes())
    }

    pub fn bytes(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}
