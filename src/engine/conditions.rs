//! Device conditions that gate model downloads.
//!
//! A model download can be large, so the gateway may refuse to start one
//! unless the device is charging or on an unmetered network. The policy is
//! [`DownloadConditions`]; the device signals come from a
//! [`DeviceConditions`] implementation.

use std::path::{Path, PathBuf};

use crate::engine::gateway::EngineError;

// ---------------------------------------------------------------------------
// DeviceConditions
// ---------------------------------------------------------------------------

/// Source of the power and network signals checked before a download.
pub trait DeviceConditions: Send + Sync {
    /// `true` when running on external power.
    fn is_charging(&self) -> bool;

    /// `true` when the active network is known to be unmetered.
    fn is_unmetered(&self) -> bool;
}

// ---------------------------------------------------------------------------
// DownloadConditions
// ---------------------------------------------------------------------------

/// Download policy configured on the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadConditions {
    pub require_unmetered_or_charging: bool,
}

impl DownloadConditions {
    /// Check the policy against the current device state.
    pub fn check(&self, device: &dyn DeviceConditions) -> Result<(), EngineError> {
        if !self.require_unmetered_or_charging {
            return Ok(());
        }
        if device.is_charging() || device.is_unmetered() {
            return Ok(());
        }
        Err(EngineError::ConditionsNotMet(
            "connect a charger or an unmetered network to download the language model".into(),
        ))
    }
}

impl Default for DownloadConditions {
    fn default() -> Self {
        Self {
            require_unmetered_or_charging: true,
        }
    }
}

// ---------------------------------------------------------------------------
// SysfsConditions
// ---------------------------------------------------------------------------

/// Reads power state from the Linux `power_supply` class.
///
/// Counts as charging when there is no battery at all, when a `Mains`
/// supply is online, or when a battery reports `Charging` / `Full`. An
/// unreadable directory is treated as a machine without a battery.
///
/// There is no portable metered-network signal, so [`is_unmetered`]
/// always returns `false` and only the power state can satisfy the policy.
///
/// [`is_unmetered`]: DeviceConditions::is_unmetered
#[derive(Debug, Clone)]
pub struct SysfsConditions {
    root: PathBuf,
}

impl SysfsConditions {
    const DEFAULT_ROOT: &'static str = "/sys/class/power_supply";

    pub fn new() -> Self {
        Self::with_root(Self::DEFAULT_ROOT)
    }

    /// Read from an alternative root (useful for tests).
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read_attr(dir: &Path, name: &str) -> Option<String> {
        std::fs::read_to_string(dir.join(name))
            .ok()
            .map(|s| s.trim().to_string())
    }
}

impl Default for SysfsConditions {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceConditions for SysfsConditions {
    fn is_charging(&self) -> bool {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                log::debug!("conditions: cannot read {}: {e}", self.root.display());
                return true;
            }
        };

        let mut has_battery = false;

        for entry in entries.flatten() {
            let dir = entry.path();
            match Self::read_attr(&dir, "type").as_deref() {
                Some("Mains") | Some("USB") => {
                    if Self::read_attr(&dir, "online").as_deref() == Some("1") {
                        return true;
                    }
                }
                Some("Battery") => {
                    has_battery = true;
                    if matches!(
                        Self::read_attr(&dir, "status").as_deref(),
                        Some("Charging") | Some("Full")
                    ) {
                        return true;
                    }
                }
                _ => {}
            }
        }

        !has_battery
    }

    fn is_unmetered(&self) -> bool {
        false
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    struct Fixed {
        charging: bool,
        unmetered: bool,
    }

    impl DeviceConditions for Fixed {
        fn is_charging(&self) -> bool {
            self.charging
        }
        fn is_unmetered(&self) -> bool {
            self.unmetered
        }
    }

    fn supply(root: &Path, name: &str, attrs: &[(&str, &str)]) {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        for (attr, value) in attrs {
            std::fs::write(dir.join(attr), format!("{value}\n")).unwrap();
        }
    }

    // ---- DownloadConditions ---

    #[test]
    fn policy_off_always_passes() {
        let policy = DownloadConditions { require_unmetered_or_charging: false };
        let device = Fixed { charging: false, unmetered: false };
        assert!(policy.check(&device).is_ok());
    }

    #[test]
    fn policy_on_accepts_charging_or_unmetered() {
        let policy = DownloadConditions::default();
        assert!(policy.check(&Fixed { charging: true, unmetered: false }).is_ok());
        assert!(policy.check(&Fixed { charging: false, unmetered: true }).is_ok());
    }

    #[test]
    fn policy_on_rejects_battery_on_metered() {
        let policy = DownloadConditions::default();
        let err = policy
            .check(&Fixed { charging: false, unmetered: false })
            .unwrap_err();
        assert!(matches!(err, EngineError::ConditionsNotMet(_)));
    }

    // ---- SysfsConditions ---

    #[test]
    fn missing_root_counts_as_charging() {
        let probe = SysfsConditions::with_root("/nonexistent/power_supply");
        assert!(probe.is_charging());
    }

    #[test]
    fn desktop_without_battery_is_charging() {
        let dir = tempdir().unwrap();
        supply(dir.path(), "AC", &[("type", "Mains"), ("online", "0")]);
        assert!(SysfsConditions::with_root(dir.path()).is_charging());
    }

    #[test]
    fn discharging_laptop_is_not_charging() {
        let dir = tempdir().unwrap();
        supply(dir.path(), "AC", &[("type", "Mains"), ("online", "0")]);
        supply(dir.path(), "BAT0", &[("type", "Battery"), ("status", "Discharging")]);
        assert!(!SysfsConditions::with_root(dir.path()).is_charging());
    }

    #[test]
    fn mains_online_is_charging() {
        let dir = tempdir().unwrap();
        supply(dir.path(), "AC", &[("type", "Mains"), ("online", "1")]);
        supply(dir.path(), "BAT0", &[("type", "Battery"), ("status", "Discharging")]);
        assert!(SysfsConditions::with_root(dir.path()).is_charging());
    }

    #[test]
    fn full_battery_is_charging() {
        let dir = tempdir().unwrap();
        supply(dir.path(), "BAT0", &[("type", "Battery"), ("status", "Full")]);
        assert!(SysfsConditions::with_root(dir.path()).is_charging());
    }

    #[test]
    fn sysfs_never_reports_unmetered() {
        assert!(!SysfsConditions::new().is_unmetered());
    }
}
