// ── Rearrangement engine ──────────────────────────────────────────────────────
//
// Stateless dispatcher: `(snapshot, mode) -> snapshot`.  Every strategy keeps
// the length and the set of `index` values of its input; only coordinates
// move.

use std::f64::consts::TAU;

use rand::Rng;
use tracing::debug;

use super::{
    letters,
    word::{WordChoice, WordLayoutBuilder},
    LayoutConfig, Mode, PlacementValidator,
};
use crate::icon::IconPosition;

/// Word mode needs at least this many icons; fewer falls back to Full Chaos.
pub(crate) const MIN_WORD_ICONS: usize = 3;

/// Radius step between Orbit's concentric rings.
const RING_STEP: i32 = 30;

/// Number of Orbit rings.
const RING_COUNT: usize = 3;

pub(crate) struct RearrangementEngine<'a> {
    validator: &'a PlacementValidator,
    config: LayoutConfig,
    /// Word to spell in Word mode; a random fun word when unset.
    word: Option<String>,
}

impl<'a> RearrangementEngine<'a> {
    pub(crate) fn new(validator: &'a PlacementValidator, config: LayoutConfig) -> Self {
        Self { validator, config, word: None }
    }

    pub(crate) fn with_word(mut self, word: Option<String>) -> Self {
        self.word = word.filter(|w| !w.trim().is_empty());
        self
    }

    pub(crate) fn rearrange<R: Rng + ?Sized>(
        &self,
        positions: &[IconPosition],
        mode: Mode,
        rng: &mut R,
    ) -> Vec<IconPosition> {
        debug!(%mode, icons = positions.len(), "rearranging");
        match mode {
            Mode::FullChaos => self.full_chaos(positions, rng),
            Mode::Sneaky => sneaky(positions, rng),
            Mode::Orbit => self.orbit(positions, rng.gen::<f64>() * TAU),
            Mode::Word => self.word(positions, rng),
            Mode::Unknown => positions.to_vec(),
        }
    }

    /// Independent random point per icon, then overlap resolution.
    fn full_chaos<R: Rng + ?Sized>(&self, positions: &[IconPosition], rng: &mut R) -> Vec<IconPosition> {
        let scattered = positions
            .iter()
            .map(|icon| icon.moved_to(self.validator.random_point(&mut *rng)))
            .collect();
        self.validator
            .resolve_overlaps(scattered, self.config.min_spacing, rng)
    }

    /// Evenly spaced by angle around the safe-area centre, rotated by
    /// `base_angle`, alternating over three rings.
    fn orbit(&self, positions: &[IconPosition], base_angle: f64) -> Vec<IconPosition> {
        if positions.is_empty() {
            return Vec::new();
        }

        let area = self.validator.safe_area();
        let (cx, cy) = area.center();
        let max_radius = area.width.min(area.height) / 3;
        let (icon_w, icon_h) = self.validator.icon_size();
        let step = TAU / positions.len() as f64;

        positions
            .iter()
            .enumerate()
            .map(|(i, icon)| {
                let angle = base_angle + i as f64 * step;
                let radius = f64::from(max_radius - (i % RING_COUNT) as i32 * RING_STEP);
                let x = cx + (radius * angle.cos()) as i32 - icon_w / 2;
                let y = cy + (radius * angle.sin()) as i32 - icon_h / 2;
                icon.moved_to(self.validator.clamp(x, y))
            })
            .collect()
    }

    /// Glyph icons first, then the scattered leftovers.
    fn word<R: Rng + ?Sized>(&self, positions: &[IconPosition], rng: &mut R) -> Vec<IconPosition> {
        if positions.len() < MIN_WORD_ICONS {
            return self.full_chaos(positions, rng);
        }

        let requested = match &self.word {
            Some(w) => w.clone(),
            None => letters::select_random_word(rng).to_owned(),
        };
        let builder = WordLayoutBuilder::new(self.validator, &self.config);
        let layout = builder.build(&requested, positions);
        if let WordChoice::Substituted { word, requested } = &layout.choice {
            debug!(%requested, substitute = %word, "too few icons for requested word");
        }

        let mut out = layout.glyph_positions;
        out.extend(builder.scatter_extras(&layout.extras, rng));
        out
    }

    /// What the next rearrangement in `mode` will do to `icon_count` icons.
    pub(crate) fn describe(&self, mode: Mode, icon_count: usize) -> String {
        match mode {
            Mode::FullChaos => format!("Will randomly reposition all {icon_count} icons"),
            Mode::Sneaky => {
                let most = sneaky_budget(icon_count);
                if most == 0 {
                    "Will leave icons alone (needs at least 4)".to_owned()
                } else {
                    format!("Will subtly swap up to {most} of {icon_count} icon positions")
                }
            }
            Mode::Orbit => format!("Will arrange {icon_count} icons in a circular pattern"),
            Mode::Word => match &self.word {
                _ if icon_count < MIN_WORD_ICONS => {
                    format!("Too few icons for a word; will scatter all {icon_count}")
                }
                Some(word) => {
                    let choice = WordLayoutBuilder::choose(word, icon_count);
                    format!("Will spell \"{}\" with {icon_count} icons", choice.word())
                }
                None => format!("Will spell a random word with {icon_count} icons"),
            },
            Mode::Unknown => "Unknown mode".to_owned(),
        }
    }
}

/// Sneaky touches between this many icons (`2..=4`), never more than half
/// the desktop.
const MIN_SNEAKY_ICONS: usize = 2;
const MAX_SNEAKY_ICONS: usize = 4;

/// Most icons Sneaky may move on a desktop of `count`: an even number, at
/// most `min(4, count / 2)`.
fn sneaky_budget(count: usize) -> usize {
    (count / 2).min(MAX_SNEAKY_ICONS) / 2 * 2
}

/// Pick `min(random(2..=4), len / 2)` icons from a shrinking pool and swap
/// their coordinates two at a time; an odd one out stays put.  Everything
/// else is left exactly as it was.
fn sneaky<R: Rng + ?Sized>(positions: &[IconPosition], rng: &mut R) -> Vec<IconPosition> {
    let mut out = positions.to_vec();
    if out.len() < 2 {
        return out;
    }

    let picked = rng
        .gen_range(MIN_SNEAKY_ICONS..=MAX_SNEAKY_ICONS)
        .min(out.len() / 2);
    let mut pool: Vec<usize> = (0..out.len()).collect();

    for _ in 0..picked / 2 {
        let a = pool.swap_remove(rng.gen_range(0..pool.len()));
        let b = pool.swap_remove(rng.gen_range(0..pool.len()));
        let (ax, ay) = (out[a].x, out[a].y);
        (out[a].x, out[a].y) = (out[b].x, out[b].y);
        (out[b].x, out[b].y) = (ax, ay);
    }

    out
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::geometry::Rect;

    fn validator() -> PlacementValidator {
        PlacementValidator::new(Some(Rect::new(0, 0, 1920, 1040)), &LayoutConfig::default())
    }

    /// A desktop-like column grid, 80 px apart.
    fn desktop(n: usize) -> Vec<IconPosition> {
        (0..n)
            .map(|i| IconPosition::new(i, 20 + (i / 10) as i32 * 80, 20 + (i % 10) as i32 * 90))
            .collect()
    }

    fn indices(positions: &[IconPosition]) -> Vec<usize> {
        let mut v: Vec<_> = positions.iter().map(|p| p.index).collect();
        v.sort_unstable();
        v
    }

    #[test]
    fn empty_snapshot_stays_empty_in_every_mode() {
        let v = validator();
        let engine = RearrangementEngine::new(&v, LayoutConfig::default());
        let mut rng = StdRng::seed_from_u64(0);
        for mode in Mode::ALL.into_iter().chain([Mode::Unknown]) {
            assert!(engine.rearrange(&[], mode, &mut rng).is_empty(), "{mode}");
        }
    }

    #[test]
    fn full_chaos_ten_icons_inside_and_apart() {
        let v = validator();
        let engine = RearrangementEngine::new(&v, LayoutConfig::default());
        let mut rng = StdRng::seed_from_u64(11);
        let out = engine.rearrange(&desktop(10), Mode::FullChaos, &mut rng);

        assert_eq!(out.len(), 10);
        assert_eq!(indices(&out), (0..10).collect::<Vec<_>>());
        assert!(out.iter().all(|p| v.is_valid(p.x, p.y)));
        for (i, a) in out.iter().enumerate() {
            for b in &out[i + 1..] {
                let apart = (a.x - b.x).abs() >= 60 || (a.y - b.y).abs() >= 60;
                assert!(apart, "{a} and {b} overlap");
            }
        }
    }

    #[test]
    fn sneaky_leaves_single_icon_alone() {
        let mut rng = StdRng::seed_from_u64(2);
        let one = desktop(1);
        assert_eq!(sneaky(&one, &mut rng), one);
    }

    #[test]
    fn sneaky_never_moves_more_than_half() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(sneaky(&desktop(3), &mut rng), desktop(3));
        }
    }

    #[test]
    fn sneaky_four_icons_swap_one_pair() {
        let four = desktop(4);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let out = sneaky(&four, &mut rng);
            let changed: Vec<_> = (0..4).filter(|&i| out[i] != four[i]).collect();
            assert_eq!(changed.len(), 2, "seed {seed}");
            let (a, b) = (changed[0], changed[1]);
            assert_eq!((out[a].x, out[a].y), (four[b].x, four[b].y));
            assert_eq!((out[b].x, out[b].y), (four[a].x, four[a].y));
            assert!(out.iter().enumerate().all(|(i, p)| p.index == i), "order and identity are kept");
        }
    }

    #[test]
    fn sneaky_only_permutes_a_few_coordinates() {
        let mut rng = StdRng::seed_from_u64(99);
        let input = desktop(30);
        let out = sneaky(&input, &mut rng);

        let changed: Vec<_> = input.iter().zip(&out).filter(|(a, b)| a != b).collect();
        assert!(changed.len() >= MIN_SNEAKY_ICONS && changed.len() <= MAX_SNEAKY_ICONS);
        assert_eq!(changed.len() % 2, 0);

        let before: HashSet<_> = changed.iter().map(|(a, _)| (a.x, a.y)).collect();
        let after: HashSet<_> = changed.iter().map(|(_, b)| (b.x, b.y)).collect();
        assert_eq!(before, after, "changed icons trade coordinates among themselves");
    }

    #[test]
    fn orbit_spaces_icons_evenly_around_center() {
        let v = PlacementValidator::new(Some(Rect::new(0, 0, 3000, 3000)), &LayoutConfig::default());
        let engine = RearrangementEngine::new(&v, LayoutConfig::default());
        let n = 12;
        let out = engine.orbit(&desktop(n), 0.0);
        let (cx, cy) = v.safe_area().center();
        let step = TAU / n as f64;

        for (i, p) in out.iter().enumerate() {
            assert!(v.is_valid(p.x, p.y));
            let dx = f64::from(p.x + 24 - cx);
            let dy = f64::from(p.y + 24 - cy);
            let angle = dy.atan2(dx).rem_euclid(TAU);
            let expected = (i as f64 * step).rem_euclid(TAU);
            let diff = (angle - expected).abs();
            assert!(diff < 0.01 || (TAU - diff) < 0.01, "icon {i}: {angle} vs {expected}");

            let radius = (dx * dx + dy * dy).sqrt();
            let ring = f64::from(v.safe_area().width / 3 - (i % 3) as i32 * 30);
            assert!((radius - ring).abs() < 2.0, "icon {i}: radius {radius} vs {ring}");
        }
    }

    #[test]
    fn orbit_clamps_on_tiny_screens() {
        let v = PlacementValidator::new(Some(Rect::new(0, 0, 200, 150)), &LayoutConfig::default());
        let engine = RearrangementEngine::new(&v, LayoutConfig::default());
        let mut rng = StdRng::seed_from_u64(4);
        let out = engine.rearrange(&desktop(9), Mode::Orbit, &mut rng);
        assert!(out.iter().all(|p| v.is_valid(p.x, p.y)));
    }

    #[test]
    fn word_mode_spells_configured_word() {
        let v = validator();
        let engine =
            RearrangementEngine::new(&v, LayoutConfig::default()).with_word(Some("hi".to_owned()));
        let mut rng = StdRng::seed_from_u64(8);
        let input = desktop(40);
        let out = engine.rearrange(&input, Mode::Word, &mut rng);

        assert_eq!(out.len(), 40);
        assert_eq!(indices(&out), (0..40).collect::<Vec<_>>());
        assert!(out.iter().all(|p| v.is_valid(p.x, p.y)));
        // The glyph icons lead, in input order.
        let needed = letters::total_icons_needed("HI");
        assert!(out[..needed].iter().enumerate().all(|(i, p)| p.index == i));
    }

    #[test]
    fn word_mode_with_two_icons_scatters() {
        let v = validator();
        let engine = RearrangementEngine::new(&v, LayoutConfig::default());
        let mut rng = StdRng::seed_from_u64(8);
        let out = engine.rearrange(&desktop(2), Mode::Word, &mut rng);
        assert_eq!(indices(&out), vec![0, 1]);
        assert!(out.iter().all(|p| v.is_valid(p.x, p.y)));
    }

    #[test]
    fn blank_word_means_random_word() {
        let v = validator();
        let engine =
            RearrangementEngine::new(&v, LayoutConfig::default()).with_word(Some("  ".to_owned()));
        assert_eq!(engine.describe(Mode::Word, 50), "Will spell a random word with 50 icons");
    }

    #[test]
    fn unknown_mode_is_identity() {
        let v = validator();
        let engine = RearrangementEngine::new(&v, LayoutConfig::default());
        let mut rng = StdRng::seed_from_u64(1);
        let input = desktop(7);
        assert_eq!(engine.rearrange(&input, Mode::Unknown, &mut rng), input);
    }

    #[test]
    fn describe_mentions_counts() {
        let v = validator();
        let engine = RearrangementEngine::new(&v, LayoutConfig::default());
        assert_eq!(
            engine.describe(Mode::FullChaos, 12),
            "Will randomly reposition all 12 icons"
        );
        assert_eq!(
            engine.describe(Mode::Sneaky, 5),
            "Will subtly swap up to 2 of 5 icon positions"
        );
        assert_eq!(engine.describe(Mode::Sneaky, 30), "Will subtly swap up to 4 of 30 icon positions");
        assert_eq!(engine.describe(Mode::Sneaky, 3), "Will leave icons alone (needs at least 4)");
        assert_eq!(
            engine.describe(Mode::Orbit, 3),
            "Will arrange 3 icons in a circular pattern"
        );
        let spelled = engine.with_word(Some("yes".to_owned())).describe(Mode::Word, 200);
        assert_eq!(spelled, "Will spell \"YES\" with 200 icons");
    }
}
