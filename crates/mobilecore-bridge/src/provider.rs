// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// MobileCore command handler.
//
// The shell hands us a command name, its arguments and a response sink. We
// answer `getMetrics` and decline everything else so the shell can route it
// elsewhere. Each call is independent: nothing is cached between requests.

use std::str::FromStr;

use mobilecore_core::config::BridgeConfig;
use mobilecore_core::error::{MobileCoreError, Result};
use mobilecore_core::types::{AppMetrics, DeviceMetrics, MetricsResult};
use thiserror::Error;
use tracing::debug;

use crate::traits::{HostEnvironment, Response, ResponseSink};

/// Name the shell uses to route commands to this module. Script code depends
/// on it; do not rename.
pub const SERVICE_NAME: &str = "MobileCore";

/// Commands this module answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    GetMetrics,
}

impl Command {
    /// Wire name of each command.
    pub const ALL: &'static [(&'static str, Command)] = &[("getMetrics", Command::GetMetrics)];

    pub fn name(self) -> &'static str {
        match self {
            Self::GetMetrics => "getMetrics",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown command: {0}")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(name: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|(wire, _)| *wire == name)
            .map(|(_, cmd)| *cmd)
            .ok_or_else(|| UnknownCommand(name.to_owned()))
    }
}

/// Outcome of offering a command to this module.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// Not ours; the shell should try other handlers.
    Unrecognized,
    /// Ours, with the response to send back (which may be an error).
    Handled(Response),
}

impl Dispatch {
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled(_))
    }
}

/// Answers metrics requests from script code using an injected host.
pub struct MetricsProvider {
    host: Box<dyn HostEnvironment>,
    config: BridgeConfig,
}

impl MetricsProvider {
    pub fn new(host: Box<dyn HostEnvironment>, config: BridgeConfig) -> Self {
        Self { host, config }
    }

    /// Provider backed by the native host for the current build target.
    pub fn for_platform(config: BridgeConfig) -> Self {
        Self::new(crate::platform_host(), config)
    }

    pub fn service_name(&self) -> &'static str {
        SERVICE_NAME
    }

    /// Decide whether `command` is ours and, if so, compute its response.
    ///
    /// `args` is part of the shell's generic calling convention and is
    /// ignored by every command we have.
    pub fn handle(&self, command: &str, args: &[serde_json::Value]) -> Dispatch {
        let Ok(cmd) = command.parse::<Command>() else {
            debug!(command, "command not handled by {SERVICE_NAME}");
            return Dispatch::Unrecognized;
        };

        debug!(command = cmd.name(), argc = args.len(), "dispatching");
        let outcome = match cmd {
            Command::GetMetrics => self.get_metrics().and_then(|m| m.to_json()),
        };

        match outcome {
            Ok(payload) => {
                debug!(command = cmd.name(), "command succeeded");
                Dispatch::Handled(Response::Success(payload))
            }
            Err(e) => {
                debug!(command = cmd.name(), kind = %e.kind(), error = %e, "command failed");
                Dispatch::Handled(Response::Error(e.wire_message()))
            }
        }
    }

    /// Shell-facing entry point: run `command` and write the answer into
    /// `sink`. Returns whether the command was ours, regardless of whether it
    /// succeeded. Unrecognised commands leave `sink` untouched.
    pub fn execute(
        &self,
        command: &str,
        args: &[serde_json::Value],
        sink: &mut dyn ResponseSink,
    ) -> bool {
        match self.handle(command, args) {
            Dispatch::Unrecognized => false,
            Dispatch::Handled(response) => {
                response.deliver(sink);
                true
            }
        }
    }

    /// Collect the full metrics record, or fail without a partial result.
    pub fn get_metrics(&self) -> Result<MetricsResult> {
        Ok(MetricsResult {
            app: self.app_metrics()?,
            device: self.device_metrics()?,
        })
    }

    fn app_metrics(&self) -> Result<AppMetrics> {
        let app_id = self.host.current_app_id()?;
        if app_id.is_empty() {
            return Err(MobileCoreError::EmptyAppId);
        }
        let app_version = self.host.app_version(&app_id)?;

        Ok(AppMetrics {
            app_id,
            sdk_version: self.config.sdk_version_or_empty(),
            app_version,
        })
    }

    fn device_metrics(&self) -> Result<DeviceMetrics> {
        Ok(DeviceMetrics {
            platform: self.host.platform_name().to_owned(),
            platform_version: self.host.os_version()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ResponseSlot;
    use serde_json::json;
    use std::collections::HashMap;

    /// Host double with a fixed package registry.
    struct FakeHost {
        app_id: String,
        registry: HashMap<String, String>,
        os_version: std::result::Result<String, String>,
    }

    impl FakeHost {
        fn android_33() -> Self {
            Self {
                app_id: "com.example.app".into(),
                registry: HashMap::from([("com.example.app".to_owned(), "2.3.1".to_owned())]),
                os_version: Ok("33".into()),
            }
        }

        fn with_app_id(mut self, id: &str) -> Self {
            self.app_id = id.into();
            self
        }
    }

    impl HostEnvironment for FakeHost {
        fn current_app_id(&self) -> Result<String> {
            Ok(self.app_id.clone())
        }

        fn app_version(&self, app_id: &str) -> Result<String> {
            self.registry
                .get(app_id)
                .cloned()
                .ok_or_else(|| MobileCoreError::Resolution(app_id.to_owned()))
        }

        fn platform_name(&self) -> &'static str {
            "android"
        }

        fn os_version(&self) -> Result<String> {
            self.os_version.clone().map_err(MobileCoreError::Bridge)
        }
    }

    /// Host whose version lookup fails without any message text.
    struct SilentHost;

    impl HostEnvironment for SilentHost {
        fn current_app_id(&self) -> Result<String> {
            Ok("com.example.app".into())
        }

        fn app_version(&self, _app_id: &str) -> Result<String> {
            Err(MobileCoreError::Resolution(String::new()))
        }

        fn platform_name(&self) -> &'static str {
            "android"
        }

        fn os_version(&self) -> Result<String> {
            Ok("33".into())
        }
    }

    fn provider(host: FakeHost) -> MetricsProvider {
        MetricsProvider::new(Box::new(host), BridgeConfig::default())
    }

    #[test]
    fn get_metrics_success_payload() {
        let p = provider(FakeHost::android_33());
        let dispatch = p.handle("getMetrics", &[]);
        assert_eq!(
            dispatch,
            Dispatch::Handled(Response::Success(json!({
                "app": {"appId": "com.example.app", "sdkVersion": "", "appVersion": "2.3.1"},
                "device": {"platform": "android", "platformVersion": "33"}
            })))
        );
    }

    #[test]
    fn arguments_are_ignored() {
        let p = provider(FakeHost::android_33());
        let with_args = p.handle("getMetrics", &[json!(1), json!({"x": "y"})]);
        assert_eq!(with_args, p.handle("getMetrics", &[]));
    }

    #[test]
    fn payload_fields_are_all_strings() {
        let p = provider(FakeHost::android_33());
        let Dispatch::Handled(Response::Success(value)) = p.handle("getMetrics", &[]) else {
            panic!("expected success");
        };
        for section in ["app", "device"] {
            let obj = value[section].as_object().expect("section object");
            assert!(
                obj.values().all(|v| v.is_string()),
                "{section} has non-string field"
            );
        }
    }

    #[test]
    fn unknown_app_id_returns_host_message() {
        let p = provider(FakeHost::android_33().with_app_id("com.example.missing"));
        assert_eq!(
            p.handle("getMetrics", &[]),
            Dispatch::Handled(Response::Error("com.example.missing".into()))
        );
    }

    #[test]
    fn empty_host_error_message_never_reaches_sink() {
        let p = MetricsProvider::new(Box::new(SilentHost), BridgeConfig::default());
        let mut slot = ResponseSlot::default();
        assert!(p.execute("getMetrics", &[], &mut slot));
        match slot.take() {
            Some(Response::Error(msg)) => assert!(!msg.trim().is_empty()),
            other => panic!("expected error response, got {other:?}"),
        }
    }

    #[test]
    fn empty_app_id_is_rejected() {
        let p = provider(FakeHost::android_33().with_app_id(""));
        let err = p.get_metrics().unwrap_err();
        assert!(matches!(err, MobileCoreError::EmptyAppId));
    }

    #[test]
    fn broken_os_lookup_fails_whole_request() {
        let mut host = FakeHost::android_33();
        host.os_version = Err("JNI detached".into());
        let p = provider(host);
        match p.handle("getMetrics", &[]) {
            Dispatch::Handled(Response::Error(msg)) => assert!(msg.contains("JNI detached")),
            other => panic!("expected error response, got {other:?}"),
        }
    }

    #[test]
    fn other_commands_are_not_handled() {
        let p = provider(FakeHost::android_33());
        assert_eq!(p.handle("foo", &[]), Dispatch::Unrecognized);
        assert_eq!(p.handle("getAppAndDeviceMetrics", &[]), Dispatch::Unrecognized);
        assert_eq!(p.handle("GETMETRICS", &[]), Dispatch::Unrecognized);
    }

    #[test]
    fn execute_reports_handled_and_fills_sink() {
        let p = provider(FakeHost::android_33());
        let mut slot = ResponseSlot::default();
        assert!(p.execute("getMetrics", &[], &mut slot));
        assert!(matches!(slot.take(), Some(Response::Success(_))));
    }

    #[test]
    fn execute_failure_is_still_handled() {
        let p = provider(FakeHost::android_33().with_app_id("com.example.missing"));
        let mut slot = ResponseSlot::default();
        assert!(p.execute("getMetrics", &[], &mut slot));
        assert_eq!(slot.take(), Some(Response::Error("com.example.missing".into())));
    }

    #[test]
    fn execute_unknown_leaves_sink_untouched() {
        let p = provider(FakeHost::android_33());
        let mut slot = ResponseSlot::default();
        assert!(!p.execute("foo", &[], &mut slot));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn sdk_version_comes_only_from_config() {
        let p = MetricsProvider::new(
            Box::new(FakeHost::android_33()),
            BridgeConfig { sdk_version: Some("1.0.0".into()) },
        );
        let metrics = p.get_metrics().expect("metrics");
        assert_eq!(metrics.app.sdk_version, "1.0.0");

        let p = provider(FakeHost::android_33());
        assert_eq!(p.get_metrics().expect("metrics").app.sdk_version, "");
    }

    #[test]
    fn repeated_calls_are_identical() {
        let p = provider(FakeHost::android_33());
        let first = p.get_metrics().expect("metrics");
        let second = p.get_metrics().expect("metrics");
        assert_eq!(first, second);
        assert_eq!(first.device.platform, "android");
    }

    #[test]
    fn concurrent_requests_are_independent() {
        let p = provider(FakeHost::android_33());
        let expected = p.handle("getMetrics", &[]);
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4).map(|_| s.spawn(|| p.handle("getMetrics", &[]))).collect();
            for h in handles {
                assert_eq!(h.join().expect("thread panicked"), expected);
            }
        });
    }

    #[test]
    fn command_names_round_trip() {
        for (wire, cmd) in Command::ALL {
            assert_eq!(wire.parse::<Command>(), Ok(*cmd));
            assert_eq!(cmd.name(), *wire);
        }
        assert_eq!("nope".parse::<Command>(), Err(UnknownCommand("nope".into())));
    }

    #[test]
    fn service_name_is_stable() {
        assert_eq!(provider(FakeHost::android_33()).service_name(), "MobileCore");
    }
}
