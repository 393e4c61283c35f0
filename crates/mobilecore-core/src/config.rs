// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration supplied by the packaging layer.
//
// The bridge does not know its own distribution version. Whoever packages the
// plugin into the app does, and hands it over here. Without it `sdkVersion`
// stays empty.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MobileCoreError, Result};

/// Plugin id under which the packaging layer publishes our version.
pub const PLUGIN_ID: &str = "core-cordova";

/// Settings provided to the bridge from outside.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BridgeConfig {
    /// Version of this bridge as recorded by the packaging step.
    pub sdk_version: Option<String>,
}

impl BridgeConfig {
    /// Parse a config document, e.g. `{"sdkVersion": "1.2.0"}`.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| MobileCoreError::Config(e.to_string()))
    }

    /// Read and parse a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        debug!(path = %path.display(), sdk_version = ?config.sdk_version, "bridge config loaded");
        Ok(config)
    }

    /// Build a config from the shell's plugin metadata map
    /// (`{"<plugin-id>": "<version>", ...}`).
    ///
    /// A missing entry leaves `sdk_version` unset; a non-string entry is an
    /// error rather than a guess.
    pub fn from_plugin_metadata(metadata: &str, plugin_id: &str) -> Result<Self> {
        let map: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(metadata).map_err(|e| MobileCoreError::Config(e.to_string()))?;

        let sdk_version = match map.get(plugin_id) {
            None => None,
            Some(serde_json::Value::String(v)) => Some(v.clone()),
            Some(other) => {
                return Err(MobileCoreError::Config(format!(
                    "plugin metadata for {plugin_id} is not a version string: {other}"
                )));
            }
        };

        Ok(Self { sdk_version })
    }

    /// The value reported as `app.sdkVersion`.
    pub fn sdk_version_or_empty(&self) -> String {
        self.sdk_version.clone().unwrap_or_default()
    }
}
