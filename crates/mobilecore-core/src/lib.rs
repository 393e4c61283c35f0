// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// MobileCore: metrics types, error taxonomy and packaging config shared by
// the platform bridge.

pub mod config;
pub mod error;
pub mod types;

pub use config::BridgeConfig;
pub use error::{ErrorKind, MobileCoreError};
pub use types::*;
