// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::ConfigError;
use serde::Deserialize;

/// Byte order used for multi-byte numeric fields and length prefixes.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

/// Largest discriminator that can be derived from a sha256 digest.
pub const MAX_DISCRIMINATOR_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct DecodeConfig {
    /// Width in bytes of computed event discriminators
    ///
    /// Env: AED_DECODE_DISCRIMINATOR_LEN
    /// Valid values: 1..=32
    /// Default: 8
    pub discriminator_len: usize,

    /// Byte order of numeric fields
    ///
    /// Env: AED_DECODE_BYTE_ORDER
    /// Valid values: little, big
    /// Default: little
    pub byte_order: ByteOrder,

    /// Width in bytes of enum variant tags
    ///
    /// Env: AED_DECODE_ENUM_TAG_WIDTH
    /// Valid values: 1, 2, 4
    /// Default: 1
    pub enum_tag_width: u8,

    /// Upper bound for the element count of a length-prefixed sequence
    ///
    /// Env: AED_DECODE_MAX_SEQUENCE_LEN
    /// Default: 1048576
    pub max_sequence_len: u32,

    /// Maximum nesting depth while walking a type
    ///
    /// Env: AED_DECODE_MAX_DEPTH
    /// Default: 64
    pub max_depth: usize,

    /// Reject payloads with bytes left over after the event fields
    ///
    /// Env: AED_DECODE_STRICT
    /// Default: false
    pub strict: bool,

    /// Rename IDL field names to snake_case when loading
    ///
    /// Env: AED_DECODE_SNAKE_CASE_FIELDS
    /// Default: true
    pub snake_case_fields: bool,
}

pub(crate) fn default_discriminator_len() -> usize {
    8
}

pub(crate) fn default_enum_tag_width() -> u8 {
    1
}

pub(crate) fn default_max_sequence_len() -> u32 {
    1 << 20
}

pub(crate) fn default_max_depth() -> usize {
    64
}

pub(crate) fn default_snake_case_fields() -> bool {
    true
}

impl DecodeConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.discriminator_len == 0 || self.discriminator_len > MAX_DISCRIMINATOR_LEN {
            return Err(ConfigError::ValidateError(format!(
                "Discriminator length must be between 1 and {}, got {}",
                MAX_DISCRIMINATOR_LEN, self.discriminator_len
            )));
        }

        if !matches!(self.enum_tag_width, 1 | 2 | 4) {
            return Err(ConfigError::ValidateError(format!(
                "Enum tag width must be 1, 2 or 4, got {}",
                self.enum_tag_width
            )));
        }

        if self.max_sequence_len == 0 {
            return Err(ConfigError::ValidateError(
                "Max sequence length cannot be 0".to_string(),
            ));
        }

        if self.max_depth == 0 {
            return Err(ConfigError::ValidateError(
                "Max depth cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            discriminator_len: default_discriminator_len(),
            byte_order: ByteOrder::default(),
            enum_tag_width: default_enum_tag_width(),
            max_sequence_len: default_max_sequence_len(),
            max_depth: default_max_depth(),
            strict: false,
            snake_case_fields: default_snake_case_fields(),
        }
    }
}
