// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android host via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Lookups go through the hosting Activity:
//
//   app id       Activity.getPackageName()
//   app version  PackageManager.getPackageInfo(id, 0).versionName
//   os version   Build.VERSION.SDK_INT
//
// A `NameNotFoundException` from the package manager is cleared and its
// message becomes the resolution failure text, so script callers see what
// Android said.

#![cfg(target_os = "android")]

use std::sync::OnceLock;

use jni::objects::{JObject, JString, JValue};
use jni::{JNIEnv, JavaVM};

use mobilecore_core::error::{MobileCoreError, Result};

use crate::traits::HostEnvironment;

const NAME_NOT_FOUND: &str = "android/content/pm/PackageManager$NameNotFoundException";

/// Local refs needed by the largest lookup, with headroom.
const LOCAL_FRAME_CAPACITY: i32 = 16;

/// The process-wide VM, wrapped once from the NDK context.
static JAVA_VM: OnceLock<JavaVM> = OnceLock::new();

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// Obtain a [`JNIEnv`] handle from the global Android context, attaching the
/// current thread if needed.
fn jni_env() -> Result<JNIEnv<'static>> {
    let vm = match JAVA_VM.get() {
        Some(vm) => vm,
        None => {
            let ctx = ndk_context::android_context();
            // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue
            // code. The pointer is valid for the lifetime of the process.
            let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }
                .map_err(|e| MobileCoreError::Bridge(format!("failed to obtain JavaVM: {e}")))?;
            JAVA_VM.get_or_init(|| vm)
        }
    };
    vm.attach_current_thread_permanently()
        .map_err(|e| MobileCoreError::Bridge(format!("failed to attach JNI thread: {e}")))
}

/// The hosting `Activity` (or application `Context`) as a [`JObject`].
fn activity() -> Result<JObject<'static>> {
    let ptr = ndk_context::android_context().context();
    if ptr.is_null() {
        return Err(MobileCoreError::Bridge(
            "Android context is null: native activity not initialised".into(),
        ));
    }
    // SAFETY: the NDK guarantees this pointer is a valid global jobject for
    // the hosting Activity.
    Ok(unsafe { JObject::from_raw(ptr.cast()) })
}

fn jni_err(context: &str, e: jni::errors::Error) -> MobileCoreError {
    MobileCoreError::Bridge(format!("{context}: {e}"))
}

/// Map a JNI result, clearing any pending Java exception on the way out.
///
/// The thread stays attached between requests, so an exception left pending
/// here would poison the next call.
fn checked<T>(env: &mut JNIEnv<'_>, context: &str, result: jni::errors::Result<T>) -> Result<T> {
    match result {
        Ok(v) => Ok(v),
        Err(jni::errors::Error::JavaException) => Err(take_exception(env, context)),
        Err(e) => Err(jni_err(context, e)),
    }
}

fn java_string(env: &mut JNIEnv<'_>, obj: JObject<'_>, what: &str) -> Result<String> {
    let value = env.get_string(&JString::from(obj)).map(String::from);
    checked(env, what, value)
}

/// Error type threaded through `with_local_frame`, which needs
/// `From<jni::errors::Error>`.
struct FrameError(MobileCoreError);

impl From<jni::errors::Error> for FrameError {
    fn from(e: jni::errors::Error) -> Self {
        Self(jni_err("local frame", e))
    }
}

/// Run `f` inside a JNI local frame so its local refs are released when it
/// returns. Needed because the dispatcher thread is attached permanently.
fn in_local_frame<T>(
    env: &mut JNIEnv<'_>,
    f: impl FnOnce(&mut JNIEnv<'_>) -> Result<T>,
) -> Result<T> {
    env.with_local_frame(LOCAL_FRAME_CAPACITY, |env| f(env).map_err(FrameError))
        .map_err(|FrameError(e)| e)
}

/// Clear whatever exception a fallible lookup left behind.
fn clear_pending(env: &mut JNIEnv<'_>, context: &str) -> Result<()> {
    if env.exception_check().unwrap_or(true) {
        env.exception_clear().map_err(|e| jni_err(&format!("{context}: exception_clear"), e))?;
    }
    Ok(())
}

/// Message of `throwable`, falling back to its class name when Java gave
/// none. `None` when neither is available.
fn throwable_message(
    env: &mut JNIEnv<'_>,
    throwable: &JObject<'_>,
    context: &str,
) -> Result<Option<String>> {
    let message = env
        .call_method(throwable, "getMessage", "()Ljava/lang/String;", &[])
        .and_then(|v| v.l())
        .ok()
        .filter(|obj| !obj.is_null())
        .and_then(|obj| env.get_string(&JString::from(obj)).ok().map(String::from))
        .filter(|m| !m.is_empty());
    clear_pending(env, context)?;
    if message.is_some() {
        return Ok(message);
    }

    let class_name = env
        .call_method(throwable, "getClass", "()Ljava/lang/Class;", &[])
        .and_then(|v| v.l())
        .and_then(|class| env.call_method(&class, "getName", "()Ljava/lang/String;", &[]))
        .and_then(|v| v.l())
        .ok()
        .filter(|obj| !obj.is_null())
        .and_then(|obj| env.get_string(&JString::from(obj)).ok().map(String::from))
        .filter(|n| !n.is_empty());
    clear_pending(env, context)?;
    Ok(class_name)
}

/// Clear a pending Java exception and turn it into an error.
///
/// `NameNotFoundException` maps to `Resolution` with the exception's own
/// message; anything else is a bridge failure. The message is never empty.
fn take_exception(env: &mut JNIEnv<'_>, context: &str) -> MobileCoreError {
    let throwable = match env.exception_occurred() {
        Ok(t) if !t.is_null() => t,
        _ => return MobileCoreError::Bridge(format!("{context}: JNI call failed")),
    };
    if let Err(e) = env.exception_clear() {
        return jni_err(&format!("{context}: exception_clear"), e);
    }

    let not_found = env.is_instance_of(&throwable, NAME_NOT_FOUND).unwrap_or(false);
    if let Err(e) = clear_pending(env, context) {
        return e;
    }
    let message = match throwable_message(env, &throwable, context) {
        Ok(message) => message,
        Err(e) => return e,
    };

    MobileCoreError::from_java_exception(context, not_found, message)
}

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

/// Android implementation of [`HostEnvironment`].
///
/// Zero-sized; all state lives on the Java side.
pub struct AndroidHost;

impl AndroidHost {
    /// Does not touch JNI; the first call happens on the first lookup.
    pub fn new() -> Self {
        Self
    }
}

impl Default for AndroidHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostEnvironment for AndroidHost {
    fn current_app_id(&self) -> Result<String> {
        let mut env = jni_env()?;
        let activity = activity()?;

        in_local_frame(&mut env, |env| {
            let call = env.call_method(&activity, "getPackageName", "()Ljava/lang/String;", &[]);
            let j_pkg = checked(env, "getPackageName", call.and_then(|v| v.l()))?;
            java_string(env, j_pkg, "get_string(packageName)")
        })
    }

    fn app_version(&self, app_id: &str) -> Result<String> {
        let mut env = jni_env()?;
        let activity = activity()?;

        tracing::info!(app_id, "Android: resolving package version");

        in_local_frame(&mut env, |env| {
            let call = env.call_method(
                &activity,
                "getPackageManager",
                "()Landroid/content/pm/PackageManager;",
                &[],
            );
            let pm = checked(env, "getPackageManager", call.and_then(|v| v.l()))?;

            let name = env.new_string(app_id);
            let j_name = checked(env, "new_string(app_id)", name)?;

            let call = env.call_method(
                &pm,
                "getPackageInfo",
                "(Ljava/lang/String;I)Landroid/content/pm/PackageInfo;",
                &[JValue::Object(&j_name), JValue::Int(0)],
            );
            let info = checked(env, "getPackageInfo", call.and_then(|v| v.l()))?;

            let field = env.get_field(&info, "versionName", "Ljava/lang/String;");
            let version_name = checked(env, "PackageInfo.versionName", field.and_then(|v| v.l()))?;

            if version_name.is_null() {
                return Err(MobileCoreError::Resolution(format!(
                    "no versionName for package {app_id}"
                )));
            }

            java_string(env, version_name, "get_string(versionName)")
        })
    }

    fn platform_name(&self) -> &'static str {
        "android"
    }

    fn os_version(&self) -> Result<String> {
        let mut env = jni_env()?;

        in_local_frame(&mut env, |env| {
            let field = env.get_static_field("android/os/Build$VERSION", "SDK_INT", "I");
            let sdk_int = checked(env, "Build.VERSION.SDK_INT", field.and_then(|v| v.i()))?;
            Ok(sdk_int.to_string())
        })
    }
}
