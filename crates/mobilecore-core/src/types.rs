// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Metrics records returned to script code.
//
// Field names on the wire are camelCase and must not change: script callers
// read `metrics.app.appId` etc. directly.

use serde::{Deserialize, Serialize};

/// Complete answer to a `getMetrics` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsResult {
    pub app: AppMetrics,
    pub device: DeviceMetrics,
}

/// Identity and version of the running application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppMetrics {
    /// Package name (Android) or bundle identifier (iOS).
    pub app_id: String,
    /// Version of this bridge's distribution. Empty unless the packaging
    /// layer supplied one.
    pub sdk_version: String,
    /// User-facing version string of the installed app.
    pub app_version: String,
}

/// Operating system family and version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceMetrics {
    /// Fixed literal per build target, e.g. "android".
    pub platform: String,
    /// OS version or API level, e.g. "33".
    pub platform_version: String,
}

impl MetricsResult {
    pub fn to_json(&self) -> crate::error::Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
