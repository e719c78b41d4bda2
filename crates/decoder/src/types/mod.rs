// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Common type wrappers for decoded values
//!
//! This module contains newtype wrappers around primitive types to provide
//! consistent formatting and serialization of decoded events.

pub mod pubkey;

pub use pubkey::Pubkey;
