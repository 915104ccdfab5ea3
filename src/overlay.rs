//! On-screen feedback composition.
//!
//! The core never draws. It produces an `HandOverlay` per detection: four text lines at
//! fixed positions plus the hand skeleton, and leaves drawing to an `OverlaySink`.
//! Lines of successive hands share positions, so a renderer drawing them in order
//! shows the most recently processed hand on top.

use serde::Serialize;

use crate::dispatch::ControlOutcome;
use crate::handedness::Side;
use crate::landmark::{Detection, HAND_CONNECTIONS};

/// BGR colour triple.
pub type Bgr = [u8; 3];

pub const GREEN: Bgr = [0, 255, 0];
pub const AMBER: Bgr = [0, 215, 255];

/// Baseline positions of the four readout lines, in pixels from the top-left corner.
pub const LINE_POSITIONS: [(i32, i32); 4] = [(10, 30), (10, 70), (10, 110), (10, 150)];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OverlayLine {
    pub text: String,
    pub position: (i32, i32),
    pub color: Bgr,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HandOverlay {
    /// Distance, volume map, brightness map, side + last action.
    pub lines: [OverlayLine; 4],
    /// Normalized landmark positions, in landmark order.
    pub points: Vec<(f64, f64)>,
    /// The same points in pixels, when the frame size is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixels: Option<Vec<(i32, i32)>>,
    pub connections: &'static [(usize, usize)],
}

/// Values a hand's overlay is built from.
#[derive(Clone, Copy, Debug)]
pub struct Readout<'a> {
    pub distance: f64,
    pub volume: f64,
    pub brightness: f64,
    pub side: Side,
    pub outcome: Option<&'a ControlOutcome>,
}

impl HandOverlay {
    pub fn compose(
        detection: &Detection,
        size: Option<(u32, u32)>,
        readout: Readout<'_>,
    ) -> Self {
        let action = readout
            .outcome
            .map(ControlOutcome::summary)
            .unwrap_or_default();
        let line = |slot: usize, text: String, color: Bgr| OverlayLine {
            text,
            position: LINE_POSITIONS[slot],
            color,
        };
        let lines = [
            line(0, format!("Distance: {:.2}", readout.distance), GREEN),
            line(1, format!("Volume map: {:.0}%", readout.volume), GREEN),
            line(
                2,
                format!("Brightness map: {}%", (readout.brightness * 100.0) as i64),
                AMBER,
            ),
            line(3, format!("Hand: {}  {}", readout.side, action), AMBER),
        ];
        Self {
            lines,
            points: detection.landmarks().iter().map(|lm| (lm.x, lm.y)).collect(),
            pixels: size.map(|(w, h)| {
                detection
                    .landmarks()
                    .iter()
                    .map(|lm| lm.to_pixel(w, h))
                    .collect()
            }),
            connections: &HAND_CONNECTIONS,
        }
    }

    pub fn text_lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuate::Control;
    use crate::landmark::Landmark;

    fn hand() -> Detection {
        let points = (0..21).map(|i| Landmark::new(0.01 * i as f64, 0.5)).collect();
        Detection::new(points, Some("Right".into())).unwrap()
    }

    #[test]
    fn composes_four_lines_at_fixed_positions() {
        let outcome = ControlOutcome {
            control: Control::Volume,
            value: 50.0,
            ok: true,
            message: None,
        };
        let overlay = HandOverlay::compose(
            &hand(),
            None,
            Readout {
                distance: 0.22,
                volume: 50.0,
                brightness: 0.525,
                side: Side::Left,
                outcome: Some(&outcome),
            },
        );
        let texts: Vec<_> = overlay.text_lines().collect();
        assert_eq!(
            texts,
            vec![
                "Distance: 0.22",
                "Volume map: 50%",
                "Brightness map: 52%",
                "Hand: Left  Left→Volume 50%",
            ]
        );
        let positions: Vec<_> = overlay.lines.iter().map(|l| l.position).collect();
        assert_eq!(positions, LINE_POSITIONS.to_vec());
        assert_eq!(overlay.lines[0].color, GREEN);
        assert_eq!(overlay.lines[3].color, AMBER);
    }

    #[test]
    fn unknown_hand_has_no_action() {
        let overlay = HandOverlay::compose(
            &hand(),
            None,
            Readout {
                distance: 0.04,
                volume: 0.0,
                brightness: 0.05,
                side: Side::Unknown,
                outcome: None,
            },
        );
        assert_eq!(overlay.lines[3].text, "Hand: Unknown  ");
        assert!(overlay.pixels.is_none());
        assert_eq!(overlay.lines[2].text, "Brightness map: 5%");
    }

    #[test]
    fn carries_the_skeleton() {
        let overlay = HandOverlay::compose(
            &hand(),
            Some((100, 200)),
            Readout {
                distance: 0.0,
                volume: 0.0,
                brightness: 0.05,
                side: Side::Right,
                outcome: None,
            },
        );
        assert_eq!(overlay.points.len(), 21);
        assert_eq!(overlay.points[4], (0.04, 0.5));
        assert_eq!(overlay.pixels.as_ref().map(|p| p[4]), Some((4, 100)));
        assert_eq!(overlay.connections.len(), HAND_CONNECTIONS.len());
    }
}
