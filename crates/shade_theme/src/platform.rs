//! System appearance probing
//!
//! Best-effort detection of the host environment's dark-appearance
//! preference:
//! - macOS: `defaults read -g AppleInterfaceStyle` (present only in dark
//!   mode)
//! - Linux: GNOME `gsettings` `color-scheme`
//! - Windows: `AppsUseLightTheme` under the Personalize registry key
//!
//! Every probe returns `None` when the platform cannot say; callers treat
//! that as "prefers day".

#[cfg(any(target_os = "macos", target_os = "linux", target_os = "windows"))]
use std::process::Command;

/// Query the OS for its dark-appearance preference.
#[cfg(target_os = "macos")]
pub fn detect_system_prefers_dark() -> Option<bool> {
    // The global default is absent entirely in light mode, so a failed
    // read still answers the question.
    let output = Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output()
        .ok()?;
    if !output.status.success() {
        return Some(false);
    }
    Some(String::from_utf8_lossy(&output.stdout).trim() == "Dark")
}

/// Query the OS for its dark-appearance preference.
#[cfg(target_os = "linux")]
pub fn detect_system_prefers_dark() -> Option<bool> {
    let output = Command::new("gsettings")
        .args(["get", "org.gnome.desktop.interface", "color-scheme"])
        .output()
        .ok()?;
    if !output.status.success() {
        tracing::debug!("gsettings color-scheme query failed");
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).contains("dark"))
}

/// Query the OS for its dark-appearance preference.
#[cfg(target_os = "windows")]
pub fn detect_system_prefers_dark() -> Option<bool> {
    let output = Command::new("reg")
        .args([
            "query",
            r"HKCU\Software\Microsoft\Windows\CurrentVersion\Themes\Personalize",
            "/v",
            "AppsUseLightTheme",
        ])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    // REG_DWORD 0x0 means apps render dark.
    let stdout = String::from_utf8_lossy(&output.stdout);
    let value = stdout.split_whitespace().last()?;
    Some(value == "0x0")
}

/// Query the OS for its dark-appearance preference.
#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
pub fn detect_system_prefers_dark() -> Option<bool> {
    None
}
