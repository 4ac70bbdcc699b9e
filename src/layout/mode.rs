// ── Rearrangement modes ───────────────────────────────────────────────────────

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::JumbleError;

/// Which strategy the engine applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum Mode {
    /// Every icon to an independent random spot, decluttered.
    FullChaos,
    /// A handful of pairwise swaps.
    #[default]
    Sneaky,
    /// Evenly spaced rings around the screen centre.
    Orbit,
    /// Icons spell out a word.
    Word,
    /// A mode name this build does not know (e.g. written by a newer
    /// version).  Rearranging with it leaves the snapshot untouched.
    #[serde(other)]
    Unknown,
}

impl Mode {
    /// Every mode a user can select.
    pub(crate) const ALL: [Self; 4] = [Self::FullChaos, Self::Sneaky, Self::Orbit, Self::Word];

    pub(crate) fn display_name(self) -> &'static str {
        match self {
            Self::FullChaos => "Full Chaos",
            Self::Sneaky => "Sneaky",
            Self::Orbit => "Orbit",
            Self::Word => "Word",
            Self::Unknown => "Unknown",
        }
    }

    /// One-line summary for menus and `status`.
    pub(crate) fn blurb(self) -> &'static str {
        match self {
            Self::FullChaos => "Randomizes all icon positions",
            Self::Sneaky => "Swaps only a few icon positions",
            Self::Orbit => "Arranges icons in circular rings",
            Self::Word => "Spells a word with your icons",
            Self::Unknown => "Leaves icons where they are",
        }
    }

    /// Message logged after a rearrangement when announcements are on.
    pub(crate) fn announcement(self) -> &'static str {
        match self {
            Self::FullChaos => "Your feng shui has been improved with full chaos!",
            Self::Sneaky => "Your feng shui has been subtly improved.",
            Self::Orbit => "Your icons have been aligned with the cosmos.",
            Self::Word => "Your desktop has something to say.",
            Self::Unknown => "Your feng shui has been improved.",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Mode {
    type Err = JumbleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "fullchaos" | "chaos" => Ok(Self::FullChaos),
            "sneaky" => Ok(Self::Sneaky),
            "orbit" => Ok(Self::Orbit),
            "word" => Ok(Self::Word),
            _ => Err(JumbleError::UnknownMode(s.to_owned())),
        }
    }
}
