// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! MobileCore: native host bridge for hybrid mobile apps.
//!
//! Script code running in the WebView asks the `MobileCore` service for
//! `getMetrics`; [`provider::MetricsProvider`] answers using a
//! [`traits::HostEnvironment`] backed by Android (JNI) or iOS (objc2), or a
//! stub on desktop/CI builds.

pub mod provider;
pub mod traits;

#[cfg(target_os = "ios")]
pub mod ios;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(any(target_os = "ios", target_os = "android")))]
pub mod stub;

pub use provider::{Command, Dispatch, MetricsProvider, SERVICE_NAME};
pub use traits::{HostEnvironment, Response, ResponseSink, ResponseSlot};

/// Host implementation for the target operating system.
pub fn platform_host() -> Box<dyn traits::HostEnvironment> {
    #[cfg(target_os = "ios")]
    {
        Box::new(ios::IosHost::new())
    }
    #[cfg(target_os = "android")]
    {
        Box::new(android::AndroidHost::new())
    }
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        Box::new(stub::StubHost)
    }
}

/// Install a `tracing` fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// For shells that do not bring their own subscriber. Safe to call more than
/// once; returns `false` if a global subscriber was already set.
pub fn init_logging() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init()
        .is_ok()
}
