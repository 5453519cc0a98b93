//! Per-application settings directories.
//!
//! Settings documents live under the platform configuration directory
//! (`%APPDATA%` on Windows, `~/.config` elsewhere), one subdirectory
//! per application.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Returns the settings directory for `app` without touching the disk.
pub fn app_settings_dir(app: &str) -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(app))
}

/// Returns the settings directory for `app`, creating it if missing.
pub fn ensure_app_settings_dir(app: &str) -> io::Result<PathBuf> {
    let Some(dir) = app_settings_dir(app) else {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            "no platform configuration directory",
        ));
    };
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Returns the path of a named settings file for `app`.
pub fn settings_file_path(app: &str, file: &str) -> Option<PathBuf> {
    app_settings_dir(app).map(|d| d.join(file))
}

/// Deletes the settings directory for `app` and everything in it.
///
/// Returns `true` when the directory is gone afterwards, including the
/// case where it never existed.
pub fn remove_app_settings_dir(app: &str) -> bool {
    match app_settings_dir(app) {
        Some(dir) => !dir.exists() || fs::remove_dir_all(&dir).is_ok(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_file_lives_under_app_dir() {
        // Platform config dir may be absent in minimal environments;
        // only assert when it resolves.
        if let (Some(dir), Some(file)) = (
            app_settings_dir("vnml-test"),
            settings_file_path("vnml-test", "settings.json"),
        ) {
            assert_eq!(file.parent(), Some(dir.as_path()));
            assert_eq!(file.file_name().and_then(|f| f.to_str()), Some("settings.json"));
        }
    }

    #[test]
    fn remove_tolerates_missing_directory() {
        if app_settings_dir("vnml-test-never-created").is_some() {
            assert!(remove_app_settings_dir("vnml-test-never-created"));
        }
    }
}
