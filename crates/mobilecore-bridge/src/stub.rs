// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub host for desktop/CI builds where there is no mobile package registry.
//
// Application lookups return `PlatformUnavailable`; real implementations live
// in the `ios` and `android` modules.

use mobilecore_core::error::{MobileCoreError, Result};

use crate::traits::HostEnvironment;

/// Host returned on non-mobile platforms.
pub struct StubHost;

impl HostEnvironment for StubHost {
    fn current_app_id(&self) -> Result<String> {
        tracing::warn!("HostEnvironment::current_app_id called on stub host");
        Err(MobileCoreError::PlatformUnavailable)
    }

    fn app_version(&self, _app_id: &str) -> Result<String> {
        tracing::warn!("HostEnvironment::app_version called on stub host");
        Err(MobileCoreError::PlatformUnavailable)
    }

    fn platform_name(&self) -> &'static str {
        std::env::consts::OS
    }

    fn os_version(&self) -> Result<String> {
        Ok("unknown".into())
    }
}
