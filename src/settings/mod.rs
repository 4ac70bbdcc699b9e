// ── Settings persistence ──────────────────────────────────────────────────────
//
// Reads and writes `%LOCALAPPDATA%\Jumble\settings.json`.
// No `unsafe`; pure safe Rust + serde_json.

use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    error::{JumbleError, Result},
    icon::IconPosition,
    layout::{LayoutConfig, Mode},
};

// ── Format version ────────────────────────────────────────────────────────────

const SETTINGS_VERSION: u32 = 1;

/// Accepted rearrangement interval, in minutes.
pub(crate) const INTERVAL_RANGE: std::ops::RangeInclusive<u32> = 1..=1440;

// ── On-disk type ──────────────────────────────────────────────────────────────

/// Root of the JSON settings file.  Every field after `version` has a default
/// so files from older builds keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub(crate) version: u32,
    /// Master switch for the scheduler.
    pub(crate) enabled: bool,
    pub(crate) mode: Mode,
    /// Unix seconds until which ticks are skipped.
    pub(crate) pause_until: Option<u64>,
    /// Log a mode-flavoured message after each rearrangement.
    pub(crate) announce: bool,
    pub(crate) interval_minutes: u32,
    /// Word mode's preferred word; a random fun word when unset.
    pub(crate) word: Option<String>,
    /// Snapshot taken before the first rearrangement, used by `restore`.
    pub(crate) original_positions: Vec<IconPosition>,
    pub(crate) layout: LayoutConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            enabled: true,
            mode: Mode::default(),
            pause_until: None,
            announce: true,
            interval_minutes: 60,
            word: None,
            original_positions: Vec::new(),
            layout: LayoutConfig::default(),
        }
    }
}

fn unix_secs(t: SystemTime) -> u64 {
    t.duration_since(UNIX_EPOCH).map_or(0, |d| d.as_secs())
}

impl Settings {
    pub(crate) fn pause_for(&mut self, duration: Duration, now: SystemTime) {
        self.pause_until = Some(unix_secs(now).saturating_add(duration.as_secs()));
    }

    pub(crate) fn resume(&mut self) {
        self.pause_until = None;
    }

    /// `true` while a pause is pending.  An expired pause is cleared.
    pub(crate) fn is_paused(&mut self, now: SystemTime) -> bool {
        match self.pause_until {
            Some(until) if unix_secs(now) < until => true,
            Some(_) => {
                self.pause_until = None;
                false
            }
            None => false,
        }
    }

    /// `""` when not paused, `"< 1 min"` for the last minute, else the
    /// remaining minutes rounded to the nearest whole.
    pub(crate) fn pause_remaining_text(&self, now: SystemTime) -> String {
        let Some(until) = self.pause_until else { return String::new() };
        let remaining = until.saturating_sub(unix_secs(now));
        match remaining {
            0 => String::new(),
            1..=59 => "< 1 min".to_owned(),
            secs => format!("{} min", (secs + 30) / 60),
        }
    }

    pub(crate) fn set_interval(&mut self, minutes: u32) -> Result<()> {
        if !INTERVAL_RANGE.contains(&minutes) {
            return Err(JumbleError::InvalidInterval(minutes));
        }
        self.interval_minutes = minutes;
        Ok(())
    }

    pub(crate) fn interval(&self) -> Duration {
        let minutes = self.interval_minutes.clamp(*INTERVAL_RANGE.start(), *INTERVAL_RANGE.end());
        Duration::from_secs(u64::from(minutes) * 60)
    }

    pub(crate) fn has_original_positions(&self) -> bool {
        !self.original_positions.is_empty()
    }

    pub(crate) fn save_original_positions(&mut self, positions: &[IconPosition]) {
        self.original_positions = positions.to_vec();
    }
}

// ── Path ──────────────────────────────────────────────────────────────────────

/// `%LOCALAPPDATA%\Jumble\settings.json`, falling back to `%APPDATA%` and
/// then the working directory.
pub(crate) fn settings_path() -> PathBuf {
    let base = std::env::var_os("LOCALAPPDATA")
        .or_else(|| std::env::var_os("APPDATA"))
        .map(|dir| PathBuf::from(dir).join("Jumble"))
        .unwrap_or_default();
    base.join("settings.json")
}

// ── Load / save ───────────────────────────────────────────────────────────────

/// Read the settings at `path`.
///
/// A missing file yields defaults.  A file with an unrecognised version is
/// copied to [`backup_path`] first and then also yields defaults, so the next
/// save cannot lose its saved layout.  Unreadable or malformed JSON is an
/// error.
pub(crate) fn load(path: &Path) -> Result<Settings> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(e) => return Err(e.into()),
    };
    let settings: Settings = serde_json::from_slice(&data)?;
    if settings.version != SETTINGS_VERSION {
        let backup = backup_path(path, settings.version);
        if !backup.exists() {
            fs::write(&backup, &data)?;
        }
        warn!(
            path = %path.display(),
            backup = %backup.display(),
            version = settings.version,
            "unrecognised settings version, using defaults"
        );
        return Ok(Settings::default());
    }
    Ok(settings)
}

/// Where a settings file of another `version` is preserved:
/// `settings.json` → `settings.v<version>.json.bak` in the same directory.
pub(crate) fn backup_path(path: &Path, version: u32) -> PathBuf {
    let stem = path.file_stem().map_or_else(|| "settings".into(), |s| s.to_string_lossy());
    path.with_file_name(format!("{stem}.v{version}.json.bak"))
}

/// Write `settings` as pretty JSON, creating the parent directory.
pub(crate) fn save(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let file = fs::File::create(path)?;
    serde_json::to_writer_pretty(file, settings)?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("jumble-test-{}-{name}", std::process::id()))
            .join("settings.json")
    }

    #[test]
    fn defaults_match_first_run() {
        let s = Settings::default();
        assert!(s.enabled);
        assert_eq!(s.mode, Mode::Sneaky);
        assert_eq!(s.interval_minutes, 60);
        assert!(s.announce);
        assert!(!s.has_original_positions());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let json = r#"{"version":1,"mode":"orbit"}"#;
        let s: Settings = serde_json::from_str(json).expect("deserialize old format");
        assert_eq!(s.mode, Mode::Orbit);
        assert!(s.enabled);
        assert_eq!(s.layout, LayoutConfig::default());
    }

    #[test]
    fn unknown_mode_deserializes_as_unknown() {
        let json = r#"{"version":1,"mode":"spiral"}"#;
        let s: Settings = serde_json::from_str(json).expect("deserialize");
        assert_eq!(s.mode, Mode::Unknown);
    }

    #[test]
    fn pause_expires_and_clears() {
        let mut s = Settings::default();
        s.pause_for(Duration::from_secs(600), at(1_000));
        assert!(s.is_paused(at(1_599)));
        assert_eq!(s.pause_until, Some(1_600));
        assert!(!s.is_paused(at(1_600)));
        assert_eq!(s.pause_until, None);
    }

    #[test]
    fn resume_clears_pause() {
        let mut s = Settings::default();
        s.pause_for(Duration::from_secs(60), at(0));
        s.resume();
        assert!(!s.is_paused(at(1)));
    }

    #[test]
    fn pause_remaining_text_formats() {
        let mut s = Settings::default();
        assert_eq!(s.pause_remaining_text(at(0)), "");
        s.pause_for(Duration::from_secs(3_600), at(0));
        assert_eq!(s.pause_remaining_text(at(0)), "60 min");
        assert_eq!(s.pause_remaining_text(at(3_600 - 89)), "1 min");
        assert_eq!(s.pause_remaining_text(at(3_600 - 30)), "< 1 min");
        assert_eq!(s.pause_remaining_text(at(3_600)), "");
    }

    #[test]
    fn interval_is_validated() {
        let mut s = Settings::default();
        assert!(s.set_interval(15).is_ok());
        assert_eq!(s.interval(), Duration::from_secs(900));
        assert!(matches!(s.set_interval(0), Err(JumbleError::InvalidInterval(0))));
        assert!(matches!(s.set_interval(1441), Err(JumbleError::InvalidInterval(1441))));
        assert_eq!(s.interval_minutes, 15);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);
        assert_eq!(load(&path).expect("load"), Settings::default());
    }

    #[test]
    fn save_then_load_keeps_positions() {
        let path = temp_path("roundtrip");
        let mut s = Settings { mode: Mode::Word, word: Some("HI".into()), ..Settings::default() };
        s.save_original_positions(&[IconPosition::new(0, 20, 20), IconPosition::new(1, 20, 110)]);
        save(&path, &s).expect("save");
        let loaded = load(&path).expect("load");
        assert_eq!(loaded, s);
        let _ = fs::remove_dir_all(path.parent().expect("parent"));
    }

    #[test]
    fn wrong_version_loads_defaults() {
        let path = temp_path("version");
        let s = Settings { version: 99, enabled: false, ..Settings::default() };
        save(&path, &s).expect("save");
        assert_eq!(load(&path).expect("load"), Settings::default());
        let _ = fs::remove_dir_all(path.parent().expect("parent"));
    }

    #[test]
    fn wrong_version_file_survives_the_next_save() {
        let path = temp_path("version-backup");
        let mut foreign = Settings { version: 2, ..Settings::default() };
        foreign.save_original_positions(&[IconPosition::new(0, 20, 20), IconPosition::new(1, 20, 110)]);
        save(&path, &foreign).expect("save");

        let mut loaded = load(&path).expect("load");
        assert!(!loaded.has_original_positions());
        loaded.enabled = false;
        save(&path, &loaded).expect("overwrite");

        let backup = backup_path(&path, 2);
        assert_eq!(backup.file_name().and_then(|n| n.to_str()), Some("settings.v2.json.bak"));
        let kept: Settings =
            serde_json::from_slice(&fs::read(&backup).expect("read backup")).expect("parse backup");
        assert_eq!(kept, foreign);

        // The first copy of a version is the one kept.
        fs::write(&path, br#"{"version":2}"#).expect("write");
        assert_eq!(load(&path).expect("load again"), Settings::default());
        let kept: Settings =
            serde_json::from_slice(&fs::read(&backup).expect("read backup")).expect("parse backup");
        assert_eq!(kept.original_positions.len(), 2);

        let _ = fs::remove_dir_all(path.parent().expect("parent"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = temp_path("malformed");
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(&path, b"{ not json").expect("write");
        assert!(matches!(load(&path), Err(JumbleError::Json(_))));
        let _ = fs::remove_dir_all(path.parent().expect("parent"));
    }
}
