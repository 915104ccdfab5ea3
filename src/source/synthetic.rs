//! Synthetic landmark source (`stub://`) for demos and tests.
//!
//! Produces two hands, raw-labelled "Left" and "Right", whose pinch opens and closes
//! on a triangle wave. The pinch sweeps from below the mapping floor to above its
//! ceiling so every clamp region is exercised. The two hands run half a period apart.

use anyhow::Result;

use super::LandmarkSource;
use crate::landmark::{Detection, HandFrame, HandLandmark, Landmark, HAND_LANDMARK_COUNT};

const PERIOD_FRAMES: u64 = 60;
const MIN_PINCH: f64 = 0.02;
const MAX_PINCH: f64 = 0.45;
const SYNTHETIC_WIDTH: u32 = 640;
const SYNTHETIC_HEIGHT: u32 = 480;

pub struct SyntheticSource {
    label: String,
    frame_count: u64,
}

impl SyntheticSource {
    pub fn new(uri: &str) -> Self {
        log::info!("landmark source: {} (synthetic)", uri);
        Self {
            label: uri.to_string(),
            frame_count: 0,
        }
    }

    /// Pinch distance of a hand at a frame, phase-shifted by `offset` frames.
    pub fn pinch_at(frame: u64, offset: u64) -> f64 {
        let t = (frame + offset) % PERIOD_FRAMES;
        let half = PERIOD_FRAMES / 2;
        let ramp = if t < half { t } else { PERIOD_FRAMES - t };
        MIN_PINCH + (MAX_PINCH - MIN_PINCH) * ramp as f64 / half as f64
    }

    fn hand(center_x: f64, pinch: f64, label: &str) -> Result<Detection> {
        let wrist = Landmark::new(center_x, 0.8);
        let mut points = vec![wrist; HAND_LANDMARK_COUNT];
        // Fingers fan out from the wrist; four joints per finger, tip last.
        for finger in 0..5 {
            let spread = (finger as f64 - 2.0) * 0.04;
            for joint in 1..=4 {
                let reach = joint as f64 * 0.08;
                points[finger * 4 + joint] =
                    Landmark::new(center_x + spread * joint as f64 / 4.0, 0.8 - reach);
            }
        }
        let tip_y = 0.45;
        points[HandLandmark::ThumbTip as usize] = Landmark::new(center_x - pinch / 2.0, tip_y);
        points[HandLandmark::IndexFingerTip as usize] =
            Landmark::new(center_x + pinch / 2.0, tip_y);
        Detection::new(points, Some(label.to_string()))
    }
}

impl LandmarkSource for SyntheticSource {
    fn name(&self) -> &str {
        &self.label
    }

    fn next_frame(&mut self) -> Result<Option<HandFrame>> {
        let index = self.frame_count;
        self.frame_count += 1;

        let detections = vec![
            Self::hand(0.3, Self::pinch_at(index, 0), "Left")?,
            Self::hand(0.7, Self::pinch_at(index, PERIOD_FRAMES / 2), "Right")?,
        ];
        Ok(Some(HandFrame {
            index,
            size: Some((SYNTHETIC_WIDTH, SYNTHETIC_HEIGHT)),
            detections,
        }))
    }
}
