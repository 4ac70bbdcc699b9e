// ── Word layout ───────────────────────────────────────────────────────────────
//
// Spells a word across the desktop, one icon per glyph cell, centred in the
// safe area.  When there are too few icons the word is swapped for the
// longest fun word that fits; failing that it is drawn until icons run out.

use rand::Rng;
use tracing::debug;

use super::{
    letters::{self, glyph},
    LayoutConfig, PlacementValidator,
};
use crate::icon::IconPosition;

/// The word actually laid out, and how it was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum WordChoice {
    /// The requested word, with enough icons for every cell.
    Complete(String),
    /// A shorter fun word standing in for `requested`.
    Substituted { word: String, requested: String },
    /// The requested word, drawn only as far as the icons reach.
    Truncated(String),
}

impl WordChoice {
    pub(crate) fn word(&self) -> &str {
        match self {
            Self::Complete(w) | Self::Truncated(w) => w,
            Self::Substituted { word, .. } => word,
        }
    }
}

/// Result of [`WordLayoutBuilder::build`].
#[derive(Debug)]
pub(crate) struct WordLayout {
    pub(crate) choice: WordChoice,
    /// Icons placed on glyph cells, in drawing order.
    pub(crate) glyph_positions: Vec<IconPosition>,
    /// Icons left over after the last glyph cell, untouched.
    pub(crate) extras: Vec<IconPosition>,
}

pub(crate) struct WordLayoutBuilder<'a> {
    validator: &'a PlacementValidator,
    icon_spacing: i32,
    letter_spacing: i32,
}

impl<'a> WordLayoutBuilder<'a> {
    pub(crate) fn new(validator: &'a PlacementValidator, config: &LayoutConfig) -> Self {
        Self {
            validator,
            icon_spacing: config.icon_spacing,
            letter_spacing: config.letter_spacing,
        }
    }

    /// Decide which word to draw with `available` icons.
    pub(crate) fn choose(word: &str, available: usize) -> WordChoice {
        let requested = word.to_uppercase();
        if available >= letters::total_icons_needed(&requested) {
            return WordChoice::Complete(requested);
        }
        match letters::find_fitting_word(available) {
            Some(fit) => WordChoice::Substituted { word: fit.to_owned(), requested },
            None => WordChoice::Truncated(requested),
        }
    }

    /// Horizontal extent of `word` in pixels, without a trailing gap.
    ///
    /// Characters missing from the atlas contribute only a letter gap, the
    /// same advance [`build`](Self::build) gives them.
    pub(crate) fn word_width(&self, word: &str) -> i32 {
        let mut width = 0;
        let mut glyphs = 0;
        for letter in word.chars() {
            match glyph(letter) {
                Some(g) => {
                    width += (g.max_col() + 1) * self.icon_spacing + self.letter_spacing;
                    glyphs += 1;
                }
                None => width += self.letter_spacing,
            }
        }
        if glyphs == 0 {
            return 0;
        }
        (width - self.letter_spacing).max(0)
    }

    fn word_height(&self, word: &str) -> i32 {
        word.chars()
            .filter_map(glyph)
            .map(|g| (g.max_row() + 1) * self.icon_spacing)
            .max()
            .unwrap_or(0)
    }

    /// Lay `word` out over `positions`.
    ///
    /// Icons are consumed in input order, one per glyph cell; each keeps its
    /// `index` and gets a clamped coordinate.
    pub(crate) fn build(&self, word: &str, positions: &[IconPosition]) -> WordLayout {
        let choice = Self::choose(word, positions.len());
        let text = choice.word();
        debug!(word = text, icons = positions.len(), ?choice, "building word layout");

        let area = self.validator.safe_area();
        let start_x = (area.left + (area.width - self.word_width(text)) / 2).max(area.left);
        let start_y = (area.top + (area.height - self.word_height(text)) / 2).max(area.top);

        let mut source = positions.iter();
        let mut glyph_positions = Vec::with_capacity(positions.len());
        let mut current_x = start_x;

        'letters: for letter in text.chars() {
            let Some(g) = glyph(letter) else {
                current_x += self.letter_spacing;
                continue;
            };
            for &(row, col) in g.cells() {
                let Some(icon) = source.next() else {
                    break 'letters;
                };
                let point = self.validator.clamp(
                    current_x + col * self.icon_spacing,
                    start_y + row * self.icon_spacing,
                );
                glyph_positions.push(icon.moved_to(point));
            }
            current_x += self.letter_spacing + g.max_col() * self.icon_spacing;
        }

        WordLayout {
            choice,
            glyph_positions,
            extras: source.cloned().collect(),
        }
    }

    /// Give each leftover icon a fresh random point.  Glyph cells are not
    /// avoided.
    pub(crate) fn scatter_extras<R: Rng + ?Sized>(
        &self,
        extras: &[IconPosition],
        rng: &mut R,
    ) -> Vec<IconPosition> {
        extras
            .iter()
            .map(|icon| {
                let (x, y) = self.validator.random_point(&mut *rng);
                icon.moved_to(self.validator.clamp(x, y))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::geometry::Rect;

    fn validator() -> PlacementValidator {
        PlacementValidator::new(Some(Rect::new(0, 0, 1920, 1040)), &LayoutConfig::default())
    }

    fn icons(n: usize) -> Vec<IconPosition> {
        (0..n).map(|i| IconPosition::new(i, 0, 0)).collect()
    }

    #[test]
    fn choose_keeps_word_that_fits() {
        let needed = letters::total_icons_needed("hi");
        assert_eq!(WordLayoutBuilder::choose("hi", needed), WordChoice::Complete("HI".into()));
    }

    #[test]
    fn choose_substitutes_cheaper_word() {
        let available = letters::total_icons_needed("HI");
        let choice = WordLayoutBuilder::choose("BYE", available);
        match &choice {
            WordChoice::Substituted { word, requested } => {
                assert_eq!(requested, "BYE");
                assert!(letters::total_icons_needed(word) <= available);
            }
            other => panic!("expected substitution, got {other:?}"),
        }
    }

    #[test]
    fn choose_truncates_when_nothing_fits() {
        assert_eq!(WordLayoutBuilder::choose("wow", 4), WordChoice::Truncated("WOW".into()));
    }

    #[test]
    fn width_uses_columns_and_gaps() {
        let v = validator();
        let b = WordLayoutBuilder::new(&v, &LayoutConfig::default());
        // H spans 4 columns, I spans 1: (4 + 1) * 80 + one 60 gap.
        assert_eq!(b.word_width("HI"), 460);
        assert_eq!(b.word_width("I"), 80);
        assert_eq!(b.word_width(""), 0);
        assert_eq!(b.word_width("!!"), 0);
    }

    #[test]
    fn hi_is_drawn_centred_with_every_icon() {
        let v = validator();
        let b = WordLayoutBuilder::new(&v, &LayoutConfig::default());
        let needed = letters::total_icons_needed("HI");
        let layout = b.build("HI", &icons(needed + 3));

        assert_eq!(layout.choice, WordChoice::Complete("HI".into()));
        assert_eq!(layout.glyph_positions.len(), needed);
        assert_eq!(layout.extras.len(), 3);
        assert!(layout.glyph_positions.iter().all(|p| v.is_valid(p.x, p.y)));

        // Safe area is 10..1910 wide; a 460 px word starts at 10 + (1900 - 460) / 2.
        let min_x = layout.glyph_positions.iter().map(|p| p.x).min().expect("placed");
        assert_eq!(min_x, 730);
        // Five rows of 80 px centred in 10..1030.
        let min_y = layout.glyph_positions.iter().map(|p| p.y).min().expect("placed");
        assert_eq!(min_y, 10 + (1020 - 400) / 2);
    }

    #[test]
    fn icons_are_consumed_in_input_order() {
        let v = validator();
        let b = WordLayoutBuilder::new(&v, &LayoutConfig::default());
        let needed = letters::total_icons_needed("HI");
        let layout = b.build("HI", &icons(needed + 2));
        let placed: Vec<_> = layout.glyph_positions.iter().map(|p| p.index).collect();
        assert_eq!(placed, (0..needed).collect::<Vec<_>>());
        let extra: Vec<_> = layout.extras.iter().map(|p| p.index).collect();
        assert_eq!(extra, vec![needed, needed + 1]);
    }

    #[test]
    fn truncated_word_places_what_it_can() {
        let v = validator();
        let b = WordLayoutBuilder::new(&v, &LayoutConfig::default());
        let layout = b.build("WOW", &icons(5));
        assert_eq!(layout.choice, WordChoice::Truncated("WOW".into()));
        assert_eq!(layout.glyph_positions.len(), 5);
        assert!(layout.extras.is_empty());
    }

    #[test]
    fn scattered_extras_keep_identity_and_bounds() {
        let v = validator();
        let b = WordLayoutBuilder::new(&v, &LayoutConfig::default());
        let mut rng = StdRng::seed_from_u64(5);
        let extras = icons(12);
        let out = b.scatter_extras(&extras, &mut rng);
        assert_eq!(out.len(), 12);
        for (before, after) in extras.iter().zip(&out) {
            assert_eq!(before.index, after.index);
            assert!(v.is_valid(after.x, after.y));
        }
    }
}
