//! Whether deprecated values are reported.
//!
//! Deprecated values keep working; every use is reported with `log::warn!`
//! unless reporting is silenced. The mode is process-wide:
//!
//! | Mode | Reports |
//! |------|---------|
//! | [`DeprecationMode::Warn`] | always |
//! | [`DeprecationMode::Silent`] | never |
//! | [`DeprecationMode::Auto`] | unless `RESPONSIVE_SILENCE_DEPRECATIONS` is `1`, `true` or `yes` |
//!
//! `Auto` is the initial mode and reads the environment on every check, so
//! the variable can be flipped at runtime.

use once_cell::sync::Lazy;
use std::sync::RwLock;

/// Environment variable consulted in [`DeprecationMode::Auto`].
pub const SILENCE_DEPRECATIONS_ENV: &str = "RESPONSIVE_SILENCE_DEPRECATIONS";

/// Reporting mode for deprecated values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeprecationMode {
    /// Warn on every deprecated value.
    Warn,
    /// Accept deprecated values quietly.
    Silent,
    /// Decide from [`SILENCE_DEPRECATIONS_ENV`].
    #[default]
    Auto,
}

static MODE: Lazy<RwLock<DeprecationMode>> = Lazy::new(|| RwLock::new(DeprecationMode::Auto));

/// Sets the process-wide reporting mode.
pub fn set_deprecation_mode(mode: DeprecationMode) {
    let mut current = MODE.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    *current = mode;
}

/// The configured mode, possibly [`DeprecationMode::Auto`].
pub fn deprecation_mode() -> DeprecationMode {
    *MODE.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Returns `true` when deprecated values must not be reported.
pub fn deprecations_silenced() -> bool {
    match deprecation_mode() {
        DeprecationMode::Warn => false,
        DeprecationMode::Silent => true,
        DeprecationMode::Auto => std::env::var(SILENCE_DEPRECATIONS_ENV)
            .map(|value| silencing_value(&value))
            .unwrap_or(false),
    }
}

fn silencing_value(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}
