// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

mod args;
mod decode;
mod error;
mod log;

pub use args::Args;
pub use decode::{ByteOrder, DecodeConfig};
pub use error::ConfigError;
pub use log::LogConfig;

use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct DecoderConfig {
    pub log: LogConfig,
    pub decode: DecodeConfig,
}

/// Flat view of the `AED_*` environment, one field per variable.
///
/// envy cannot fill nested structs, so the sections are assembled from this.
#[derive(Debug, Deserialize)]
struct EnvVars {
    #[serde(default = "log::default_level")]
    log_level: String,
    #[serde(default)]
    log_json: bool,
    #[serde(default)]
    log_strip_ansi: bool,
    #[serde(default)]
    log_write: bool,
    #[serde(default = "log::default_write_path")]
    log_write_path: String,
    #[serde(default = "log::default_write_max_file_size")]
    log_write_max_file_size: u64,
    #[serde(default = "log::default_write_max_files")]
    log_write_max_files: usize,

    #[serde(default = "decode::default_discriminator_len")]
    decode_discriminator_len: usize,
    #[serde(default)]
    decode_byte_order: ByteOrder,
    #[serde(default = "decode::default_enum_tag_width")]
    decode_enum_tag_width: u8,
    #[serde(default = "decode::default_max_sequence_len")]
    decode_max_sequence_len: u32,
    #[serde(default = "decode::default_max_depth")]
    decode_max_depth: usize,
    #[serde(default)]
    decode_strict: bool,
    #[serde(default = "decode::default_snake_case_fields")]
    decode_snake_case_fields: bool,
}

impl From<EnvVars> for DecoderConfig {
    fn from(env: EnvVars) -> Self {
        Self {
            log: LogConfig {
                level: env.log_level,
                json: env.log_json,
                strip_ansi: env.log_strip_ansi,
                write: env.log_write,
                write_path: env.log_write_path,
                write_max_file_size: env.log_write_max_file_size,
                write_max_files: env.log_write_max_files,
            },
            decode: DecodeConfig {
                discriminator_len: env.decode_discriminator_len,
                byte_order: env.decode_byte_order,
                enum_tag_width: env.decode_enum_tag_width,
                max_sequence_len: env.decode_max_sequence_len,
                max_depth: env.decode_max_depth,
                strict: env.decode_strict,
                snake_case_fields: env.decode_snake_case_fields,
            },
        }
    }
}

impl DecoderConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Load variables from a `.env` style file first, then read the environment.
    ///
    /// A missing file is not an error; variables already set in the process
    /// environment take precedence over the file.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            dotenv::from_path(path)?;
        }
        Self::from_env()
    }

    /// Build the config from an explicit set of `(key, value)` pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env = envy::prefixed("AED_").from_iter::<_, EnvVars>(vars)?;
        let config = Self::from(env);
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.log.validate()?;
        self.decode.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = DecoderConfig::default();
        assert_eq!(config.log.level, "info");
        assert_eq!(config.decode.discriminator_len, 8);
        assert_eq!(config.decode.byte_order, ByteOrder::Little);
    }

    #[test]
    fn test_empty_env_matches_default() {
        let config = DecoderConfig::from_vars(Vec::new()).unwrap();
        let default = DecoderConfig::default();
        assert_eq!(config.log.level, default.log.level);
        assert_eq!(config.log.write_path, default.log.write_path);
        assert_eq!(config.decode.max_sequence_len, default.decode.max_sequence_len);
        assert_eq!(config.decode.max_depth, default.decode.max_depth);
        assert!(config.decode.snake_case_fields);
        assert!(!config.decode.strict);
    }

    #[test]
    fn test_prefixed_vars_are_read() {
        let config = DecoderConfig::from_vars(vars(&[
            ("AED_LOG_LEVEL", "debug"),
            ("AED_LOG_JSON", "true"),
            ("AED_DECODE_DISCRIMINATOR_LEN", "4"),
            ("AED_DECODE_BYTE_ORDER", "big"),
            ("AED_DECODE_STRICT", "true"),
            ("UNRELATED", "ignored"),
        ]))
        .unwrap();

        assert_eq!(config.log.level, "debug");
        assert!(config.log.json);
        assert_eq!(config.decode.discriminator_len, 4);
        assert_eq!(config.decode.byte_order, ByteOrder::Big);
        assert!(config.decode.strict);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let result = DecoderConfig::from_vars(vars(&[("AED_LOG_LEVEL", "loud")]));
        assert!(matches!(result, Err(ConfigError::ValidateError(_))));

        let result = DecoderConfig::from_vars(vars(&[("AED_DECODE_ENUM_TAG_WIDTH", "3")]));
        assert!(matches!(result, Err(ConfigError::ValidateError(_))));

        let result = DecoderConfig::from_vars(vars(&[("AED_DECODE_MAX_DEPTH", "many")]));
        assert!(matches!(result, Err(ConfigError::EnvError(_))));
    }

    #[test]
    #[serial]
    fn test_from_env_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "AED_DECODE_MAX_DEPTH=12").unwrap();
        writeln!(file, "AED_LOG_STRIP_ANSI=true").unwrap();

        let config = DecoderConfig::from_env_file(file.path()).unwrap();
        assert_eq!(config.decode.max_depth, 12);
        assert!(config.log.strip_ansi);

        unsafe {
            std::env::remove_var("AED_DECODE_MAX_DEPTH");
            std::env::remove_var("AED_LOG_STRIP_ANSI");
        }
    }

    #[test]
    #[serial]
    fn test_missing_env_file_is_ignored() {
        let config = DecoderConfig::from_env_file("/nonexistent/.env.decoder").unwrap();
        assert_eq!(config.decode.discriminator_len, 8);
    }
}
