// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Event decoding entry points.
//!
//! A raw event buffer is `discriminator || borsh(fields)`. The discriminator
//! selects the event definition, then the fields are decoded against its
//! layout, starting right after the discriminator.

use crate::decode::{BinaryCursor, DecodeError, DecodeLimits, DecodedValue, Decoder, EventValue};
use crate::discriminator::DiscriminatorResolver;
use crate::schema::{EventDef, SchemaModel};
use config::DecodeConfig;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventDecodeError {
    /// No declared event's discriminator prefixes the buffer. Carries the
    /// leading bytes that were examined.
    #[error("Unknown event discriminator 0x{}", hex::encode(.0))]
    UnknownDiscriminator(Vec<u8>),

    #[error("Failed to decode event payload: {0}")]
    PayloadDecode(#[from] DecodeError),
}

impl EventDecodeError {
    /// True when the buffer simply belongs to an event this schema does not declare.
    pub fn is_unknown_discriminator(&self) -> bool {
        matches!(self, Self::UnknownDiscriminator(_))
    }
}

/// Decode one event buffer against `schema` using default limits.
///
/// Bytes left over after the last field are ignored.
pub fn decode_event(schema: &SchemaModel, buffer: &[u8]) -> Result<EventValue, EventDecodeError> {
    decode_with(schema, buffer, DecodeLimits::default(), false)
}

/// Like [`decode_event`], but left-over bytes are an error.
pub fn decode_event_strict(
    schema: &SchemaModel,
    buffer: &[u8],
) -> Result<EventValue, EventDecodeError> {
    decode_with(schema, buffer, DecodeLimits::default(), true)
}

fn decode_with(
    schema: &SchemaModel,
    buffer: &[u8],
    limits: DecodeLimits,
    strict: bool,
) -> Result<EventValue, EventDecodeError> {
    let event = DiscriminatorResolver::new(schema)
        .match_prefix(buffer)
        .ok_or_else(|| unknown_discriminator(schema, buffer))?;

    let mut cursor = BinaryCursor::with_byte_order(buffer, schema.encoding().byte_order);
    cursor.advance(event.discriminator().len())?;

    let value = Decoder::for_schema(schema, limits).decode(event.layout(), &mut cursor)?;
    let data = match value {
        DecodedValue::Struct(fields) => fields,
        _ => Default::default(),
    };

    if !cursor.is_empty() {
        if strict {
            return Err(DecodeError::TrailingBytes {
                remaining: cursor.remaining(),
                offset: cursor.offset(),
            }
            .into());
        }
        tracing::debug!(
            event = event.name(),
            trailing = cursor.remaining(),
            offset = cursor.offset(),
            "Ignoring trailing bytes after event"
        );
    }

    Ok(EventValue {
        name: event.name().to_string(),
        data,
    })
}

fn unknown_discriminator(schema: &SchemaModel, buffer: &[u8]) -> EventDecodeError {
    let width = schema.encoding().discriminator_len.min(buffer.len());
    EventDecodeError::UnknownDiscriminator(buffer[..width].to_vec())
}

/// A schema paired with the limits and trailing-bytes policy to decode with.
///
/// Discriminator matching and size bounds read tables the schema built when
/// it was loaded; a call only borrows them. Cheap to clone and safe to share
/// between threads.
#[derive(Debug, Clone)]
pub struct EventDecoder {
    schema: Arc<SchemaModel>,
    limits: DecodeLimits,
    strict: bool,
}

impl EventDecoder {
    pub fn new(schema: SchemaModel) -> Self {
        Self {
            schema: Arc::new(schema),
            limits: DecodeLimits::default(),
            strict: false,
        }
    }

    pub fn from_config(schema: SchemaModel, config: &DecodeConfig) -> Self {
        Self {
            schema: Arc::new(schema),
            limits: DecodeLimits::from(config),
            strict: config.strict,
        }
    }

    pub fn with_limits(mut self, limits: DecodeLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn schema(&self) -> &SchemaModel {
        &self.schema
    }

    pub fn limits(&self) -> DecodeLimits {
        self.limits
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn decode(&self, buffer: &[u8]) -> Result<EventValue, EventDecodeError> {
        decode_with(&self.schema, buffer, self.limits, self.strict)
    }

    /// The definition `buffer` would be decoded as, without decoding it.
    pub fn identify(&self, buffer: &[u8]) -> Option<&EventDef> {
        DiscriminatorResolver::new(&self.schema).match_prefix(buffer)
    }
}
