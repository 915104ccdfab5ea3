//! Handedness resolution with mirrored-view correction.
//!
//! The capture is flipped horizontally before detection so that everything drawn on
//! the frame lines up with what the user sees. The detector judges left/right on the
//! flipped image, so its labels name the opposite physical hand and must be swapped.
//! Swapping twice, or not at all, silently routes each hand to the other control.

use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    Left,
    Right,
    Unknown,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "Left",
            Side::Right => "Right",
            Side::Unknown => "Unknown",
        }
    }

    fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::Unknown => Side::Unknown,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a raw capability label into the side the user sees.
///
/// Only the exact labels `"Left"` and `"Right"` are recognized; anything else,
/// including a missing label, is `Side::Unknown` regardless of mirroring.
pub fn resolve(raw_label: Option<&str>, mirrored: bool) -> Side {
    let side = match raw_label {
        Some("Left") => Side::Left,
        Some("Right") => Side::Right,
        _ => return Side::Unknown,
    };
    if mirrored {
        side.opposite()
    } else {
        side
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_label_is_unknown() {
        assert_eq!(resolve(None, true), Side::Unknown);
        assert_eq!(resolve(None, false), Side::Unknown);
    }

    #[test]
    fn mirrored_labels_are_swapped() {
        assert_eq!(resolve(Some("Left"), true), Side::Right);
        assert_eq!(resolve(Some("Right"), true), Side::Left);
    }

    #[test]
    fn unmirrored_labels_pass_through() {
        assert_eq!(resolve(Some("Left"), false), Side::Left);
        assert_eq!(resolve(Some("Right"), false), Side::Right);
    }

    #[test]
    fn unrecognized_labels_are_unknown() {
        for raw in ["", "left", "RIGHT", "Both", "Unknown"] {
            assert_eq!(resolve(Some(raw), true), Side::Unknown, "{:?}", raw);
            assert_eq!(resolve(Some(raw), false), Side::Unknown, "{:?}", raw);
        }
    }

    #[test]
    fn display_round_trips_through_resolver() {
        for side in [Side::Left, Side::Right] {
            assert_eq!(resolve(Some(&side.to_string()), false), side);
        }
        assert_eq!(Side::Unknown.to_string(), "Unknown");
    }
}
