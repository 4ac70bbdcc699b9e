// ── Command layer ─────────────────────────────────────────────────────────────
//
// One method per CLI subcommand.  Every command re-reads the settings file,
// applies its change and writes it back; the `run` loop picks such edits up
// before its next tick.  This is the only layer that returns `JumbleError`.

use std::{
    path::PathBuf,
    thread,
    time::{Duration, SystemTime},
};

use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    error::Result,
    icon::IconPosition,
    layout::{LayoutConfig, Mode, PlacementValidator, RearrangementEngine},
    platform,
    scheduler::{IconDesk, Scheduler, TickOutcome},
    settings::{self, Settings},
};

pub(crate) struct App {
    settings_path: PathBuf,
}

impl App {
    /// `settings_path` overrides the per-user default location.
    pub(crate) fn new(settings_path: Option<PathBuf>) -> Self {
        Self { settings_path: settings_path.unwrap_or_else(settings::settings_path) }
    }

    fn load(&self) -> Result<Settings> {
        settings::load(&self.settings_path)
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        settings::save(&self.settings_path, settings)?;
        debug!(path = %self.settings_path.display(), "settings saved");
        Ok(())
    }

    /// Load, mutate, save.
    fn update(&self, f: impl FnOnce(&mut Settings) -> Result<()>) -> Result<Settings> {
        let mut settings = self.load()?;
        f(&mut settings)?;
        self.save(&settings)?;
        Ok(settings)
    }

    // ── Scheduler ────────────────────────────────────────────────────────────

    /// Rearrange every `interval_minutes` until the process is killed.
    pub(crate) fn run(&self) -> Result<()> {
        let _guard = platform::single_instance()?;
        let mut settings = self.load()?;
        let mut desk = platform::desktop(false)?;
        let probe = platform::fullscreen_probe();
        let mut rng = rand::thread_rng();

        if !settings.has_original_positions() && desk.is_ready() {
            let original = desk.snapshot();
            if !original.is_empty() {
                settings.save_original_positions(&original);
                self.save(&settings)?;
                info!(icons = original.len(), "saved original layout");
            }
        }

        info!(
            mode = %settings.mode,
            interval_minutes = settings.interval_minutes,
            "scheduler started"
        );

        loop {
            match self.load() {
                Ok(fresh) => settings = fresh,
                Err(e) => warn!(error = %e, "could not re-read settings, keeping previous"),
            }

            let pause_before = settings.pause_until;
            let validator = PlacementValidator::new(platform::work_area(), &settings.layout);
            let outcome = Scheduler::new(&mut desk, &probe, validator).tick(
                &mut settings,
                SystemTime::now(),
                &mut rng,
            );
            log_outcome(&outcome);

            if settings.pause_until != pause_before {
                if let Err(e) = self.save(&settings) {
                    warn!(error = %e, "could not persist expired pause");
                }
            }

            thread::sleep(settings.interval());
        }
    }

    // ── Desktop commands ─────────────────────────────────────────────────────

    /// Rearrange once, now, ignoring the enabled and paused flags.
    pub(crate) fn shuffle(&self, mode: Option<Mode>, word: Option<String>) -> Result<()> {
        let mut settings = self.load()?;
        let mut desk = platform::ready_desktop(false)?;
        let current = desk.snapshot();

        if !settings.has_original_positions() && !current.is_empty() {
            settings.save_original_positions(&current);
            self.save(&settings)?;
            info!(icons = current.len(), "saved original layout");
        }

        let mode = mode.unwrap_or(settings.mode);
        let validator = PlacementValidator::new(platform::work_area(), &settings.layout);
        let engine = RearrangementEngine::new(&validator, settings.layout)
            .with_word(word.or(settings.word));
        println!("{}", engine.describe(mode, current.len()));

        let next = engine.rearrange(&current, mode, &mut rand::thread_rng());
        let moved = desk.apply(&next);
        println!("Moved {moved} of {} icons ({mode})", current.len());
        if settings.announce {
            info!(%mode, "{}", mode.announcement());
        }
        Ok(())
    }

    pub(crate) fn list(&self) -> Result<()> {
        let mut desk = platform::ready_desktop(true)?;
        let icons = desk.snapshot();
        for icon in &icons {
            println!("{icon}");
        }
        println!("{} icons", icons.len());
        Ok(())
    }

    pub(crate) fn save_original(&self) -> Result<()> {
        let mut desk = platform::ready_desktop(false)?;
        let icons = desk.snapshot();
        self.update(|s| {
            s.save_original_positions(&icons);
            Ok(())
        })?;
        println!("Saved original layout of {} icons", icons.len());
        Ok(())
    }

    pub(crate) fn restore(&self) -> Result<()> {
        let settings = self.load()?;
        if !settings.has_original_positions() {
            println!("No original layout saved yet");
            return Ok(());
        }
        let mut desk = platform::ready_desktop(false)?;
        let moved = desk.apply(&settings.original_positions);
        println!(
            "Restored {moved} of {} icons to their original positions",
            settings.original_positions.len()
        );
        Ok(())
    }

    // ── Settings commands ────────────────────────────────────────────────────

    pub(crate) fn set_enabled(&self, enabled: bool) -> Result<()> {
        self.update(|s| {
            s.enabled = enabled;
            Ok(())
        })?;
        println!("Jumble is {}", if enabled { "enabled" } else { "disabled" });
        Ok(())
    }

    pub(crate) fn pause(&self, minutes: u64) -> Result<()> {
        let now = SystemTime::now();
        let settings = self.update(|s| {
            s.pause_for(Duration::from_secs(minutes.saturating_mul(60)), now);
            Ok(())
        })?;
        println!("Paused ({} remaining)", settings.pause_remaining_text(now));
        Ok(())
    }

    pub(crate) fn resume(&self) -> Result<()> {
        self.update(|s| {
            s.resume();
            Ok(())
        })?;
        println!("Resumed");
        Ok(())
    }

    pub(crate) fn set_mode(&self, mode: Mode) -> Result<()> {
        self.update(|s| {
            s.mode = mode;
            Ok(())
        })?;
        println!("Mode set to {mode}: {}", mode.blurb());
        Ok(())
    }

    pub(crate) fn set_interval(&self, minutes: u32) -> Result<()> {
        self.update(|s| s.set_interval(minutes))?;
        println!("Rearranging every {minutes} min");
        Ok(())
    }

    /// Set Word mode's word, or clear it when `word` is `None` or blank.
    pub(crate) fn set_word(&self, word: Option<String>) -> Result<()> {
        let word = word
            .map(|w| w.trim().to_uppercase())
            .filter(|w| !w.is_empty());
        let settings = self.update(|s| {
            s.word = word;
            Ok(())
        })?;
        match &settings.word {
            Some(w) => println!("Word mode will spell \"{w}\""),
            None => println!("Word mode will pick a random word"),
        }
        Ok(())
    }

    pub(crate) fn status(&self) -> Result<()> {
        let mut settings = self.load()?;
        let now = SystemTime::now();
        let paused = settings.is_paused(now);

        println!("Settings:  {}", self.settings_path.display());
        println!("Enabled:   {}", settings.enabled);
        println!("Mode:      {} ({})", settings.mode, settings.mode.blurb());
        let modes: Vec<_> = Mode::ALL.iter().map(|m| m.display_name()).collect();
        println!("Modes:     {}", modes.join(", "));
        if paused {
            println!("Paused:    {} remaining", settings.pause_remaining_text(now));
        }
        println!("Interval:  {} min", settings.interval_minutes);
        println!("Word:      {}", settings.word.as_deref().unwrap_or("(random)"));
        println!("Original:  {} icons saved", settings.original_positions.len());

        if let Ok(mut desk) = platform::ready_desktop(false) {
            let count = desk.snapshot().len();
            let validator = PlacementValidator::new(platform::work_area(), &settings.layout);
            let engine =
                RearrangementEngine::new(&validator, settings.layout).with_word(settings.word.clone());
            println!("Next:      {}", engine.describe(settings.mode, count));
        }
        Ok(())
    }

    /// Rearrange a synthetic desktop and print the result as JSON.
    pub(crate) fn preview(
        &self,
        mode: Option<Mode>,
        icons: usize,
        seed: Option<u64>,
        word: Option<String>,
    ) -> Result<()> {
        let settings = self.load()?;
        let report = build_preview(
            &settings.layout,
            platform::work_area(),
            mode.unwrap_or(settings.mode),
            icons,
            seed.unwrap_or_else(rand::random),
            word.or(settings.word),
        );
        println!("{}", serde_json::to_string_pretty(&report)?);
        Ok(())
    }
}

fn log_outcome(outcome: &TickOutcome) {
    match outcome {
        TickOutcome::Disabled => info!("skipped: disabled"),
        TickOutcome::Paused => info!("skipped: paused"),
        TickOutcome::NoControl => info!("skipped: desktop icon list not found"),
        TickOutcome::Fullscreen => info!("skipped: full-screen application in front"),
        TickOutcome::NoIcons => info!("skipped: no icons on the desktop"),
        TickOutcome::Rearranged { mode, icons, moved } => {
            info!(%mode, icons, moved, "rearranged desktop");
        }
    }
}

// ── Preview ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct PreviewReport {
    mode: Mode,
    seed: u64,
    description: String,
    before: Vec<IconPosition>,
    after: Vec<IconPosition>,
}

fn build_preview(
    config: &LayoutConfig,
    work_area: Option<crate::geometry::Rect>,
    mode: Mode,
    icons: usize,
    seed: u64,
    word: Option<String>,
) -> PreviewReport {
    let validator = PlacementValidator::new(work_area, config);
    let before = synthetic_grid(&validator, config.icon_spacing, icons);
    let engine = RearrangementEngine::new(&validator, *config).with_word(word);
    let mut rng = StdRng::seed_from_u64(seed);
    let after = engine.rearrange(&before, mode, &mut rng);
    PreviewReport { mode, seed, description: engine.describe(mode, icons), before, after }
}

/// `count` icons in desktop order: top-to-bottom columns from the safe-area
/// origin, `spacing` apart.
fn synthetic_grid(validator: &PlacementValidator, spacing: i32, count: usize) -> Vec<IconPosition> {
    let area = validator.safe_area();
    let step = spacing.max(1);
    let rows = usize::try_from(area.height / step).unwrap_or(0).max(1);
    (0..count)
        .map(|i| {
            let col = i32::try_from(i / rows).unwrap_or(i32::MAX);
            let row = i32::try_from(i % rows).unwrap_or(0);
            let x = area.left.saturating_add(col.saturating_mul(step));
            let y = area.top.saturating_add(row.saturating_mul(step));
            IconPosition::new(i, x, y).moved_to(validator.clamp(x, y))
        })
        .collect()
}
