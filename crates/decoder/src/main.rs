// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use anchor_event_decoder::logging;
use anchor_event_decoder::state::AppState;
use anyhow::Context;
use config::{Args, DecoderConfig};
use serde::Serialize;

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse_args();
    let config = DecoderConfig::from_env_file(&args.env_file)?;
    logging::init(&config.log)?;

    let state = AppState::new(config, &args.idl)?;
    let schema = state.decoder.schema();
    tracing::info!(
        idl = %args.idl.display(),
        program = schema.program().unwrap_or("<unnamed>"),
        events = schema.events().len(),
        strict = state.decoder.is_strict(),
        "Decoder ready"
    );

    let mut failed = 0usize;
    for (index, data) in args.data.iter().enumerate() {
        match state.decoder.decode_base64(data) {
            Ok(event) => print_json(&event, args.pretty)?,
            Err(err) => {
                tracing::error!(payload = index, error = %err, "Failed to decode payload");
                failed += 1;
            }
        }
    }

    if let Some(path) = &args.logs {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read log file {}", path.display()))?;
        let events = state.decoder.decode_logs(contents.lines());
        tracing::info!(events = events.len(), "Decoded events from program logs");
        for event in &events {
            print_json(event, args.pretty)?;
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} payloads failed to decode", args.data.len());
    }

    Ok(())
}
