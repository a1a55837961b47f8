// Copyright (c) 2024 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::tpm::TrustStore;

/// Exponent assumed for key anchors that do not name one.
const DEFAULT_ANCHOR_EXPONENT: &str = "10001";

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Config {
    /// EK certificate trust anchors
    #[serde(default)]
    pub trust_store: TrustStoreConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TrustStoreConfig {
    /// Whether to load the built-in vendor table
    #[serde(default = "default_builtin_anchors")]
    pub builtin_anchors: bool,

    /// Extra issuing certificates, PEM or DER
    #[serde(default)]
    pub certificates: Vec<PathBuf>,

    /// Extra issuing keys given as a bare modulus
    #[serde(default)]
    pub keys: Vec<KeyAnchorConfig>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct KeyAnchorConfig {
    pub name: String,

    /// Hex encoded modulus
    pub modulus: String,

    /// Hex encoded public exponent
    #[serde(default = "default_anchor_exponent")]
    pub exponent: String,
}

fn default_builtin_anchors() -> bool {
    true
}

fn default_anchor_exponent() -> String {
    DEFAULT_ANCHOR_EXPONENT.to_string()
}

impl Default for TrustStoreConfig {
    fn default() -> Self {
        Self {
            builtin_anchors: true,
            certificates: Vec::new(),
            keys: Vec::new(),
        }
    }
}

impl Config {
    /// Read `config_path` and build the trust store it describes.
    pub fn load_trust_store(config_path: &str) -> Result<TrustStore> {
        let config = Config::try_from(config_path)
            .with_context(|| format!("failed to parse config file {config_path}"))?;
        TrustStore::from_config(&config.trust_store).context("failed to build EK trust store")
    }
}

impl TryFrom<&str> for Config {
    type Error = config::ConfigError;
    fn try_from(config_path: &str) -> Result<Self, Self::Error> {
        let c = config::Config::builder()
            .add_source(config::File::with_name(config_path))
            .set_default("trust_store.builtin_anchors", true)?
            .build()?;

        let cfg = c.try_deserialize()?;
        Ok(cfg)
    }
}
