// ── Rearrangement scheduler ───────────────────────────────────────────────────
//
// One tick = read snapshot → rearrange → write back, guarded by the
// enabled/paused/fullscreen checks.  Runs serially on the calling thread; the
// `run` loop just sleeps between ticks.  Desktop access goes through
// `IconDesk` so ticks can be exercised without a real shell.

use std::time::SystemTime;

use rand::Rng;
use tracing::{debug, info};

use crate::{
    icon::IconPosition,
    layout::{Mode, PlacementValidator, RearrangementEngine},
    settings::Settings,
};

/// Indexed access to the desktop's icons.
pub(crate) trait IconDesk {
    /// `true` once the icon-list control has been discovered.
    fn is_ready(&self) -> bool;
    /// Re-run discovery; `true` if the control is now available.
    fn refresh(&mut self) -> bool;
    /// Every readable icon, in control order.  Unreadable icons are omitted.
    fn snapshot(&mut self) -> Vec<IconPosition>;
    /// Move every icon in `positions`; returns how many moves succeeded.
    fn apply(&mut self, positions: &[IconPosition]) -> usize;
}

/// Is a full-screen application (game, video, presentation) in front?
pub(crate) trait FullscreenProbe {
    fn fullscreen_active(&self) -> bool;
}

/// Probe for hosts without a foreground-window notion.
#[cfg_attr(windows, allow(dead_code))]
pub(crate) struct NeverFullscreen;

impl FullscreenProbe for NeverFullscreen {
    fn fullscreen_active(&self) -> bool {
        false
    }
}

/// What a single tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TickOutcome {
    Disabled,
    Paused,
    /// The icon-list control is missing even after a refresh.
    NoControl,
    Fullscreen,
    NoIcons,
    Rearranged { mode: Mode, icons: usize, moved: usize },
}

pub(crate) struct Scheduler<'a, D, F> {
    desk: &'a mut D,
    probe: &'a F,
    validator: PlacementValidator,
}

impl<'a, D: IconDesk, F: FullscreenProbe> Scheduler<'a, D, F> {
    pub(crate) fn new(desk: &'a mut D, probe: &'a F, validator: PlacementValidator) -> Self {
        Self { desk, probe, validator }
    }

    /// Run one rearrangement cycle against `settings`.
    ///
    /// May clear an expired pause, so callers should persist `settings`
    /// afterwards if it changed.
    pub(crate) fn tick<R: Rng + ?Sized>(
        &mut self,
        settings: &mut Settings,
        now: SystemTime,
        rng: &mut R,
    ) -> TickOutcome {
        if !settings.enabled {
            return TickOutcome::Disabled;
        }
        if settings.is_paused(now) {
            return TickOutcome::Paused;
        }
        if !self.desk.is_ready() && !self.desk.refresh() {
            return TickOutcome::NoControl;
        }
        if self.probe.fullscreen_active() {
            return TickOutcome::Fullscreen;
        }

        // An empty read can mean the shell recreated its control; rediscover
        // once before giving up on this tick.
        let mut current = self.desk.snapshot();
        if current.is_empty() && self.desk.refresh() {
            current = self.desk.snapshot();
        }
        if current.is_empty() {
            return TickOutcome::NoIcons;
        }

        let engine = RearrangementEngine::new(&self.validator, settings.layout)
            .with_word(settings.word.clone());
        let next = engine.rearrange(&current, settings.mode, rng);
        let moved = self.desk.apply(&next);
        debug!(icons = current.len(), moved, "applied rearrangement");

        if settings.announce {
            info!(mode = %settings.mode, "{}", settings.mode.announcement());
        }

        TickOutcome::Rearranged { mode: settings.mode, icons: current.len(), moved }
    }
}
