// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Event extraction from transaction log messages.
//!
//! Anchor's `emit!` writes each event as a `Program data: <base64>` log line.

use crate::decode::EventValue;
use crate::event::{EventDecodeError, EventDecoder};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

/// Prefix of log lines carrying emitted event data.
pub const PROGRAM_DATA_PREFIX: &str = "Program data: ";

#[derive(Debug, Error)]
pub enum LogParseError {
    #[error("Invalid base64 event data: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error(transparent)]
    Event(#[from] EventDecodeError),
}

/// Base64 payload of a `Program data:` line, if the line is one.
pub fn program_data(line: &str) -> Option<&str> {
    line.trim().strip_prefix(PROGRAM_DATA_PREFIX).map(str::trim)
}

/// Decode standard-alphabet, padded base64.
pub fn decode_base64(data: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(data.trim())
}

/// An event recovered from a log line.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LogEvent {
    /// Zero-based index of the line in the input.
    pub line: usize,
    pub event: EventValue,
}

impl EventDecoder {
    /// Decode a base64 encoded event buffer.
    pub fn decode_base64(&self, data: &str) -> Result<EventValue, LogParseError> {
        let bytes = decode_base64(data)?;
        Ok(self.decode(&bytes)?)
    }

    /// Decode every `Program data:` line whose discriminator belongs to this
    /// schema.
    ///
    /// Other lines are ignored, as are events of other programs. Lines that
    /// fail to decode are logged and skipped.
    pub fn decode_logs<'l, I>(&self, lines: I) -> Vec<LogEvent>
    where
        I: IntoIterator<Item = &'l str>,
    {
        let mut events = Vec::new();
        for (index, line) in lines.into_iter().enumerate() {
            let Some(data) = program_data(line) else {
                continue;
            };
            match self.decode_base64(data) {
                Ok(event) => {
                    tracing::debug!(line = index, event = %event.name, "Decoded event from logs");
                    events.push(LogEvent { line: index, event });
                }
                Err(LogParseError::Event(err)) if err.is_unknown_discriminator() => {
                    tracing::debug!(line = index, "{}", err);
                }
                Err(err) => {
                    tracing::warn!(line = index, error = %err, "Failed to decode program data");
                }
            }
        }
        events
    }
}
