// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

/// The bytes do not match the expected type shape.
///
/// Every variant carries the cursor offset at which the mismatch was found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Unexpected end of input at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        needed: usize,
        remaining: usize,
        offset: usize,
    },

    #[error("Invalid bool encoding 0x{byte:02x} at offset {offset}")]
    InvalidBoolEncoding { byte: u8, offset: usize },

    #[error("Invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("Invalid option tag 0x{tag:02x} at offset {offset}")]
    InvalidOptionTag { tag: u8, offset: usize },

    #[error("Invalid variant tag {tag} at offset {offset}: enum has {variants} variants")]
    InvalidVariantTag {
        tag: u32,
        variants: usize,
        offset: usize,
    },

    #[error("Sequence length {len} at offset {offset} exceeds what {remaining} remaining bytes can hold")]
    LengthOverflow {
        len: u32,
        remaining: usize,
        offset: usize,
    },

    #[error("Unknown type '{name}' referenced at offset {offset}")]
    UnknownType { name: String, offset: usize },

    #[error("Type nesting deeper than {max_depth} levels at offset {offset}")]
    DepthLimitExceeded { max_depth: usize, offset: usize },

    #[error("{remaining} trailing bytes after the event at offset {offset}")]
    TrailingBytes { remaining: usize, offset: usize },
}

impl DecodeError {
    /// Offset into the buffer at which decoding failed.
    pub fn offset(&self) -> usize {
        match self {
            Self::UnexpectedEof { offset, .. }
            | Self::InvalidBoolEncoding { offset, .. }
            | Self::InvalidUtf8 { offset }
            | Self::InvalidOptionTag { offset, .. }
            | Self::InvalidVariantTag { offset, .. }
            | Self::LengthOverflow { offset, .. }
            | Self::UnknownType { offset, .. }
            | Self::DepthLimitExceeded { offset, .. }
            | Self::TrailingBytes { offset, .. } => *offset,
        }
    }
}
