// ── Letter atlas ──────────────────────────────────────────────────────────────
//
// Coarse glyphs drawn on a 5-row grid, one desktop icon per cell.  Built once
// on first use and never mutated.  A glyph's icon count is the size of its
// cell set, so the two can never disagree.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Candidate words for Word mode, in preference order for ties.
pub(crate) const FUN_WORDS: &[&str] = &[
    "LOL", "WOW", "OK", "HI", "BYE", "YES", "NO", "WIN", "BAD", "SAD", "MAD", "FUN",
];

/// One letter's cells as `(row, column)`, in placement order.
#[derive(Debug)]
pub(crate) struct Glyph {
    cells: &'static [(i32, i32)],
}

impl Glyph {
    pub(crate) fn cells(&self) -> &'static [(i32, i32)] {
        self.cells
    }

    /// Icons needed to draw this letter.
    pub(crate) fn icon_count(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn max_col(&self) -> i32 {
        self.cells.iter().map(|&(_, col)| col).max().unwrap_or(0)
    }

    pub(crate) fn max_row(&self) -> i32 {
        self.cells.iter().map(|&(row, _)| row).max().unwrap_or(0)
    }
}

#[rustfmt::skip]
static ATLAS: Lazy<HashMap<char, Glyph>> = Lazy::new(|| {
    let table: [(char, &'static [(i32, i32)]); 26] = [
        ('A', &[(0, 1), (0, 2), (1, 0), (1, 3), (2, 0), (2, 1), (2, 2), (2, 3), (3, 0), (3, 3), (4, 0), (4, 3)]),
        ('B', &[(0, 0), (0, 1), (0, 2), (1, 0), (1, 3), (2, 0), (2, 1), (2, 2), (3, 0), (3, 3), (4, 0), (4, 1), (4, 2)]),
        ('C', &[(0, 1), (0, 2), (0, 3), (1, 0), (2, 0), (3, 0), (4, 1), (4, 2), (4, 3)]),
        ('D', &[(0, 0), (0, 1), (0, 2), (1, 0), (1, 3), (2, 0), (2, 3), (3, 0), (3, 3), (4, 0), (4, 1), (4, 2)]),
        ('E', &[(0, 0), (0, 1), (0, 2), (0, 3), (1, 0), (2, 0), (2, 1), (2, 2), (3, 0), (4, 0), (4, 1), (4, 2), (4, 3)]),
        ('F', &[(0, 0), (0, 1), (0, 2), (0, 3), (1, 0), (2, 0), (2, 1), (2, 2), (3, 0), (4, 0)]),
        ('G', &[(0, 1), (0, 2), (0, 3), (1, 0), (2, 0), (2, 2), (2, 3), (3, 0), (3, 3), (4, 1), (4, 2), (4, 3)]),
        ('H', &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (0, 3), (1, 3), (2, 3), (3, 3), (4, 3), (2, 1), (2, 2)]),
        ('I', &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]),
        ('J', &[(0, 3), (1, 3), (2, 3), (3, 0), (3, 3), (4, 1), (4, 2)]),
        ('K', &[(0, 0), (0, 3), (1, 0), (1, 2), (2, 0), (2, 1), (3, 0), (3, 2), (4, 0), (4, 3)]),
        ('L', &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (4, 1), (4, 2)]),
        ('M', &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (1, 1), (2, 2), (1, 3), (0, 4), (1, 4), (2, 4), (3, 4), (4, 4)]),
        ('N', &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (1, 1), (2, 1), (2, 2), (3, 2), (0, 3), (1, 3), (2, 3), (3, 3), (4, 3)]),
        ('O', &[(0, 1), (0, 2), (1, 0), (1, 3), (2, 0), (2, 3), (3, 0), (3, 3), (4, 1), (4, 2)]),
        ('P', &[(0, 0), (0, 1), (0, 2), (1, 0), (1, 3), (2, 0), (2, 1), (2, 2), (3, 0), (4, 0)]),
        ('Q', &[(0, 1), (0, 2), (1, 0), (1, 3), (2, 0), (2, 3), (3, 0), (3, 2), (4, 1), (4, 2), (4, 3)]),
        ('R', &[(0, 0), (0, 1), (0, 2), (1, 0), (1, 3), (2, 0), (2, 1), (2, 2), (3, 0), (3, 2), (4, 0), (4, 3)]),
        ('S', &[(0, 1), (0, 2), (0, 3), (1, 0), (2, 1), (2, 2), (3, 3), (4, 0), (4, 1), (4, 2)]),
        ('T', &[(0, 0), (0, 1), (0, 2), (1, 1), (2, 1), (3, 1), (4, 1)]),
        ('U', &[(0, 0), (1, 0), (2, 0), (3, 0), (0, 3), (1, 3), (2, 3), (3, 3), (4, 1), (4, 2)]),
        ('V', &[(0, 0), (1, 0), (2, 1), (3, 1), (4, 2), (3, 3), (2, 3), (1, 4), (0, 4)]),
        ('W', &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 1), (2, 2), (3, 2), (4, 3), (0, 4), (1, 4), (2, 4), (3, 4)]),
        ('X', &[(0, 0), (0, 3), (1, 1), (1, 2), (2, 0), (2, 3), (3, 1), (3, 2), (4, 0), (4, 3)]),
        ('Y', &[(0, 0), (0, 4), (1, 1), (1, 3), (2, 2), (3, 2), (4, 2)]),
        ('Z', &[(0, 0), (0, 1), (0, 2), (0, 3), (1, 3), (2, 2), (3, 1), (4, 0), (4, 1), (4, 2), (4, 3)]),
    ];
    table
        .into_iter()
        .map(|(letter, cells)| (letter, Glyph { cells }))
        .collect()
});

/// Glyph for an uppercase letter, or `None` for anything the atlas lacks.
pub(crate) fn glyph(letter: char) -> Option<&'static Glyph> {
    ATLAS.get(&letter)
}

/// Sum of glyph sizes over the letters of `word` (case-insensitive).
/// Characters without a glyph need no icons.
pub(crate) fn total_icons_needed(word: &str) -> usize {
    word.chars()
        .flat_map(char::to_uppercase)
        .filter_map(glyph)
        .map(Glyph::icon_count)
        .sum()
}

/// Longest fun word drawable with `available` icons; ties go to the earlier
/// entry of [`FUN_WORDS`].
pub(crate) fn find_fitting_word(available: usize) -> Option<&'static str> {
    FUN_WORDS
        .iter()
        .copied()
        .filter(|w| total_icons_needed(w) <= available)
        .fold(None, |best: Option<&'static str>, w| match best {
            Some(b) if b.chars().count() >= w.chars().count() => Some(b),
            _ => Some(w),
        })
}

pub(crate) fn select_random_word<R: rand::Rng + ?Sized>(rng: &mut R) -> &'static str {
    FUN_WORDS[rng.gen_range(0..FUN_WORDS.len())]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn every_letter_has_a_glyph() {
        for letter in 'A'..='Z' {
            assert!(glyph(letter).is_some(), "missing {letter}");
        }
        assert!(glyph('a').is_none(), "atlas is uppercase only");
        assert!(glyph('!').is_none());
    }

    #[test]
    fn glyph_cells_are_distinct_and_on_grid() {
        for letter in 'A'..='Z' {
            let g = glyph(letter).expect("glyph");
            let unique: HashSet<_> = g.cells().iter().collect();
            assert_eq!(unique.len(), g.icon_count(), "duplicate cell in {letter}");
            assert!(g.cells().iter().all(|&(r, c)| (0..5).contains(&r) && (0..5).contains(&c)));
            assert_eq!(g.max_row(), 4, "{letter} should span all five rows");
        }
    }

    #[test]
    fn hi_needs_the_sum_of_its_letters() {
        let h = glyph('H').expect("H").icon_count();
        let i = glyph('I').expect("I").icon_count();
        assert_eq!(total_icons_needed("HI"), h + i);
        assert_eq!(total_icons_needed("hi"), h + i);
    }

    #[test]
    fn unknown_characters_cost_nothing() {
        assert_eq!(total_icons_needed("H-I 1"), total_icons_needed("HI"));
        assert_eq!(total_icons_needed(""), 0);
    }

    #[test]
    fn fitting_word_prefers_longest_then_list_order() {
        // Plenty of icons: the first three-letter word wins.
        assert_eq!(find_fitting_word(1000), Some("LOL"));

        let hi = total_icons_needed("HI");
        let fit = find_fitting_word(hi).expect("HI fits");
        assert!(total_icons_needed(fit) <= hi);
    }

    #[test]
    fn nothing_fits_below_the_cheapest_word() {
        let cheapest = FUN_WORDS.iter().map(|w| total_icons_needed(w)).min().expect("non-empty");
        assert_eq!(find_fitting_word(cheapest - 1), None);
        assert!(find_fitting_word(cheapest).is_some());
    }

    #[test]
    fn random_word_comes_from_the_pool() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            assert!(FUN_WORDS.contains(&select_random_word(&mut rng)));
        }
    }
}
