use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::warn;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tick_interval_secs: u64,
    pub fps_cap: u32,
    pub enable_color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_secs: 10,
            fps_cap: 30,
            enable_color: true,
        }
    }
}

impl Settings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs.max(1))
    }

    pub fn frame_time(&self) -> Duration {
        let fps = self.fps_cap.clamp(10, 240);
        Duration::from_secs_f32(1.0 / fps as f32)
    }
}

pub struct Paths {
    pub data_dir: PathBuf,
    pub settings_path: PathBuf,
}

impl Paths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            data_dir: dir.to_path_buf(),
            settings_path: dir.join("settings.json"),
        }
    }
}

/// Resolves the per-user data directory. Creating it is best effort; a
/// directory that can't be made just means settings and the log file
/// won't be written.
pub fn project_paths() -> Option<Paths> {
    let proj = ProjectDirs::from("com", "virtual_pet", "VirtualPet")?;
    let dir = proj.data_local_dir();
    fs::create_dir_all(dir).ok();
    Some(Paths::in_dir(dir))
}

/// Settings from the data directory, or defaults when there is none.
pub fn settings_or_default(paths: Option<&Paths>) -> Settings {
    paths
        .map(|p| load_settings(&p.settings_path))
        .unwrap_or_default()
}

pub fn load_settings(path: &Path) -> Settings {
    let Ok(s) = fs::read_to_string(path) else {
        return Settings::default();
    };
    match serde_json::from_str::<Settings>(&s) {
        Ok(v) => v,
        Err(e) => {
            warn!("ignoring unreadable settings at {}: {e}", path.display());
            Settings::default()
        }
    }
}

pub fn save_settings_atomic(path: &Path, s: &Settings) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(s)?;
    fs::write(&tmp, data).with_context(|| format!("writing {}", tmp.display()))?;
    atomic_rename(&tmp, path)
}

/// Writes settings back only when the session ended cleanly. A failed save
/// is logged and does not change the session's own result.
pub fn save_after_clean_exit(
    session: Result<()>,
    paths: Option<&Paths>,
    stored: &Settings,
) -> Result<()> {
    session?;
    if let Some(p) = paths {
        if let Err(e) = save_settings_atomic(&p.settings_path, stored) {
            warn!("could not save settings: {e:#}");
        }
    }
    Ok(())
}

fn atomic_rename(from: &Path, to: &Path) -> Result<()> {
    // Rename-over-existing is not atomic on Windows; remove first.
    if cfg!(windows) && to.exists() {
        let _ = fs::remove_file(to);
    }
    fs::rename(from, to).with_context(|| format!("renaming into {}", to.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "virtual_pet_config_{name}_{}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = scratch_dir("missing");
        assert_eq!(load_settings(&dir.join("nope.json")), Settings::default());
    }

    #[test]
    fn garbage_gives_defaults() {
        let dir = scratch_dir("garbage");
        let path = dir.join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_settings(&path), Settings::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = scratch_dir("partial");
        let path = dir.join("settings.json");
        fs::write(&path, r#"{ "tick_interval_secs": 3 }"#).unwrap();
        let s = load_settings(&path);
        assert_eq!(s.tick_interval_secs, 3);
        assert_eq!(s.fps_cap, 30);
        assert!(s.enable_color);
    }

    #[test]
    fn save_then_load() {
        let dir = scratch_dir("save");
        let path = dir.join("settings.json");
        let s = Settings {
            tick_interval_secs: 2,
            fps_cap: 60,
            enable_color: false,
        };
        save_settings_atomic(&path, &s).unwrap();
        save_settings_atomic(&path, &s).unwrap();
        assert_eq!(load_settings(&path), s);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn unusable_data_dir_falls_back_to_defaults() {
        let dir = scratch_dir("blocked");
        // a regular file where the data directory should be
        let blocker = dir.join("not_a_dir");
        fs::write(&blocker, "x").unwrap();
        let paths = Paths::in_dir(&blocker.join("inner"));

        assert_eq!(settings_or_default(Some(&paths)), Settings::default());
        assert_eq!(settings_or_default(None), Settings::default());
        assert!(save_settings_atomic(&paths.settings_path, &Settings::default()).is_err());
    }

    #[test]
    fn settings_saved_only_after_clean_exit() {
        let dir = scratch_dir("exit");
        let paths = Paths::in_dir(&dir);
        let _ = fs::remove_file(&paths.settings_path);
        let s = Settings {
            fps_cap: 45,
            ..Settings::default()
        };

        let failed = save_after_clean_exit(Err(anyhow::anyhow!("terminal gone")), Some(&paths), &s);
        assert!(failed.is_err());
        assert!(!paths.settings_path.exists());

        save_after_clean_exit(Ok(()), Some(&paths), &s).unwrap();
        assert_eq!(load_settings(&paths.settings_path), s);
    }

    #[test]
    fn unwritable_settings_do_not_fail_clean_exit() {
        let dir = scratch_dir("exit_blocked");
        let blocker = dir.join("not_a_dir");
        fs::write(&blocker, "x").unwrap();
        let paths = Paths::in_dir(&blocker);
        assert!(save_after_clean_exit(Ok(()), Some(&paths), &Settings::default()).is_ok());
        assert!(save_after_clean_exit(Ok(()), None, &Settings::default()).is_ok());
    }

    #[test]
    fn zero_interval_is_one_second() {
        let s = Settings {
            tick_interval_secs: 0,
            ..Settings::default()
        };
        assert_eq!(s.tick_interval(), Duration::from_secs(1));
    }
}
