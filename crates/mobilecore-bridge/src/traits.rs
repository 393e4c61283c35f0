// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic seams between the metrics handler and the native shell.
//
// `HostEnvironment` is what we ask the OS; `ResponseSink` is how we answer the
// script caller.

use mobilecore_core::error::Result;

/// Host lookups needed to build a metrics record.
///
/// Implementations must be cheap to call repeatedly: nothing is cached on
/// our side, every request asks again.
pub trait HostEnvironment: Send + Sync {
    /// Package name / bundle identifier of the running application.
    fn current_app_id(&self) -> Result<String>;

    /// Installed version string for `app_id`.
    ///
    /// Unknown identifiers must fail with `MobileCoreError::Resolution`
    /// carrying the host's own "not found" text.
    fn app_version(&self, app_id: &str) -> Result<String>;

    /// Fixed OS family literal for this build target (e.g. "android").
    fn platform_name(&self) -> &'static str;

    /// OS version or API level. A healthy host always has one; an error here
    /// means the native bridge itself broke.
    fn os_version(&self) -> Result<String>;
}

/// Success/error callback pair for a single request.
///
/// Exactly one of the two methods is called per handled request.
pub trait ResponseSink {
    fn success(&mut self, payload: serde_json::Value);
    fn error(&mut self, message: String);
}

/// One response, either the payload or the error message text.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Success(serde_json::Value),
    Error(String),
}

impl Response {
    /// Hand this response to a sink.
    pub fn deliver(self, sink: &mut dyn ResponseSink) {
        match self {
            Self::Success(payload) => sink.success(payload),
            Self::Error(message) => sink.error(message),
        }
    }
}

/// Sink that keeps the response it receives, for callers that want the
/// value back instead of a callback.
#[derive(Debug, Default)]
pub struct ResponseSlot(pub Option<Response>);

impl ResponseSlot {
    pub fn take(&mut self) -> Option<Response> {
        self.0.take()
    }
}

impl ResponseSink for ResponseSlot {
    fn success(&mut self, payload: serde_json::Value) {
        self.0 = Some(Response::Success(payload));
    }

    fn error(&mut self, message: String) {
        self.0 = Some(Response::Error(message));
    }
}
