// ── Icon snapshot types ───────────────────────────────────────────────────────
//
// Pure data.  An `IconPosition` is what the desktop list control reports for
// one item; a snapshot is the ordered list of them at one instant.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of one desktop icon.
///
/// `index` is the item's slot in the shell's list control and is only
/// meaningful for one discovery session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct IconPosition {
    pub(crate) index: usize,
    pub(crate) x: i32,
    pub(crate) y: i32,
    /// Caption shown under the icon, when it was read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<String>,
}

impl IconPosition {
    pub(crate) fn new(index: usize, x: i32, y: i32) -> Self {
        Self { index, x, y, name: None }
    }

    /// Same icon, moved to `(x, y)`.
    pub(crate) fn moved_to(&self, (x, y): (i32, i32)) -> Self {
        Self { x, y, ..self.clone() }
    }
}

impl fmt::Display for IconPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "icon[{}] at ({}, {})", self.index, self.x, self.y)?;
        if let Some(name) = &self.name {
            write!(f, " - {name}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moved_to_keeps_index_and_name() {
        let icon = IconPosition { name: Some("Recycle Bin".to_owned()), ..IconPosition::new(3, 10, 20) };
        let moved = icon.moved_to((100, 200));
        assert_eq!(moved.index, 3);
        assert_eq!((moved.x, moved.y), (100, 200));
        assert_eq!(moved.name.as_deref(), Some("Recycle Bin"));
    }

    #[test]
    fn display_includes_name_only_when_known() {
        assert_eq!(IconPosition::new(0, 1, 2).to_string(), "icon[0] at (1, 2)");
        let named = IconPosition { name: Some("Docs".to_owned()), ..IconPosition::new(4, 5, 6) };
        assert_eq!(named.to_string(), "icon[4] at (5, 6) - Docs");
    }

    #[test]
    fn name_is_omitted_from_json_when_absent() {
        let json = serde_json::to_string(&IconPosition::new(1, 2, 3)).expect("serialize");
        assert_eq!(json, r#"{"index":1,"x":2,"y":3}"#);
        let back: IconPosition = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.name, None);
    }
}
