// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to .env file (e.g., .env.devnet)
    #[arg(short, long, default_value = ".env")]
    pub env_file: PathBuf,

    /// Path to the program's Anchor IDL JSON file
    #[arg(short, long)]
    pub idl: PathBuf,

    /// File of program log lines; every `Program data:` line is decoded
    #[arg(short, long)]
    pub logs: Option<PathBuf>,

    /// Pretty-print decoded events
    #[arg(short, long)]
    pub pretty: bool,

    /// Base64-encoded event payloads
    pub data: Vec<String>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_payloads_and_idl() {
        let args = Args::try_parse_from(["decoder", "--idl", "mint.json", "AAAA", "BBBB"]).unwrap();
        assert_eq!(args.idl, PathBuf::from("mint.json"));
        assert_eq!(args.env_file, PathBuf::from(".env"));
        assert_eq!(args.data, vec!["AAAA".to_string(), "BBBB".to_string()]);
        assert!(args.logs.is_none());
        assert!(!args.pretty);
    }

    #[test]
    fn test_idl_is_required() {
        assert!(Args::try_parse_from(["decoder", "AAAA"]).is_err());
    }
}
