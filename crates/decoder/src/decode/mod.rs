// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Borsh-style payload decoding driven by schema type nodes.

mod cursor;
mod decoder;
mod error;
mod value;

pub use cursor::BinaryCursor;
pub use decoder::{DecodeLimits, Decoder, decode};
pub use error::DecodeError;
pub use value::{DecodedValue, EventValue, Fields, Scalar};
