// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Decoder for events emitted by Anchor programs, driven by the program's IDL.
//!
//! ```no_run
//! use anchor_event_decoder::{SchemaModel, decode_event};
//!
//! let schema = SchemaModel::load(&std::fs::read_to_string("idl.json")?)?;
//! let event = decode_event(&schema, &[0u8; 80])?;
//! println!("{}", event.to_json());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod decode;
pub mod discriminator;
pub mod event;
pub mod logging;
pub mod program_logs;
pub mod schema;
pub mod state;
pub mod types;

#[cfg(test)]
pub mod test_fixtures;

pub use decode::{DecodeError, DecodeLimits, DecodedValue, EventValue, Scalar};
pub use event::{EventDecodeError, EventDecoder, decode_event, decode_event_strict};
pub use schema::{LoadError, SchemaModel};
pub use types::Pubkey;
