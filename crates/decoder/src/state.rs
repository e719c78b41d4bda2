// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::event::EventDecoder;
use crate::schema::{LoadOptions, SchemaModel};
use anyhow::Context;
use config::DecoderConfig;
use std::path::Path;

#[derive(Clone)]
pub struct AppState {
    pub config: DecoderConfig,
    pub decoder: EventDecoder,
}

impl AppState {
    /// Load the IDL at `idl_path` using the decode settings in `config`.
    pub fn new(config: DecoderConfig, idl_path: &Path) -> anyhow::Result<Self> {
        let source = std::fs::read_to_string(idl_path)
            .with_context(|| format!("Failed to read IDL file {}", idl_path.display()))?;
        let schema = SchemaModel::load_with(&source, &LoadOptions::from(&config.decode))
            .with_context(|| format!("Failed to load IDL file {}", idl_path.display()))?;
        let decoder = EventDecoder::from_config(schema, &config.decode);
        Ok(Self { config, decoder })
    }
}
