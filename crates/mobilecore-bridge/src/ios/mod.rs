// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// iOS host via objc2.
//
// Requires compilation with the iOS SDK (Xcode). Everything here is
// Foundation only (NSBundle, NSProcessInfo), so unlike UIKit calls none of it
// needs the main thread.

#![cfg(target_os = "ios")]

use objc2::rc::Retained;
use objc2_foundation::{NSBundle, NSProcessInfo, NSString};

use mobilecore_core::error::{MobileCoreError, Result};

use crate::traits::HostEnvironment;

/// Info.plist key holding the user-facing version ("2.3.1").
const SHORT_VERSION_KEY: &str = "CFBundleShortVersionString";

/// iOS implementation of [`HostEnvironment`].
pub struct IosHost;

impl IosHost {
    pub fn new() -> Self {
        Self
    }
}

impl Default for IosHost {
    fn default() -> Self {
        Self::new()
    }
}

/// Look up a bundle by identifier; the main bundle is tried first so the
/// common case does not scan loaded frameworks.
fn bundle_for(app_id: &str) -> Option<Retained<NSBundle>> {
    let main = NSBundle::mainBundle();
    if main
        .bundleIdentifier()
        .is_some_and(|id| id.to_string() == app_id)
    {
        return Some(main);
    }
    NSBundle::bundleWithIdentifier(&NSString::from_str(app_id))
}

impl HostEnvironment for IosHost {
    fn current_app_id(&self) -> Result<String> {
        NSBundle::mainBundle()
            .bundleIdentifier()
            .map(|id| id.to_string())
            .ok_or_else(|| MobileCoreError::Resolution("main bundle has no identifier".into()))
    }

    fn app_version(&self, app_id: &str) -> Result<String> {
        tracing::info!(app_id, "iOS: resolving bundle version");

        let bundle = bundle_for(app_id)
            .ok_or_else(|| MobileCoreError::Resolution(format!("bundle not found: {app_id}")))?;

        let value = bundle
            .objectForInfoDictionaryKey(&NSString::from_str(SHORT_VERSION_KEY))
            .ok_or_else(|| {
                MobileCoreError::Resolution(format!("{SHORT_VERSION_KEY} missing for {app_id}"))
            })?;

        let Ok(version) = value.downcast::<NSString>() else {
            let msg = format!("{SHORT_VERSION_KEY} is not a string");
            return Err(MobileCoreError::Bridge(msg));
        };
        Ok(version.to_string())
    }

    fn platform_name(&self) -> &'static str {
        "ios"
    }

    fn os_version(&self) -> Result<String> {
        let v = NSProcessInfo::processInfo().operatingSystemVersion();
        // Same shape as UIDevice.systemVersion: patch only when non-zero.
        Ok(if v.patchVersion == 0 {
            format!("{}.{}", v.majorVersion, v.minorVersion)
        } else {
            format!("{}.{}.{}", v.majorVersion, v.minorVersion, v.patchVersion)
        })
    }
}
