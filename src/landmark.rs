//! Typed hand landmarks.
//!
//! - `Landmark`: one normalized point (x, y in 0..1 of image width/height).
//! - `HandLandmark`: index of each of the 21 points in the MediaPipe hand topology.
//! - `Detection`: one hand in one frame. Exactly 21 landmarks plus an optional raw side label.
//! - `HandFrame`: every detection the capability produced for a single frame.
//!
//! A `Detection` can only be built through `Detection::new`, which checks the landmark
//! count. Everything downstream of the source boundary may index landmarks freely.

use anyhow::{anyhow, Result};
use serde::Serialize;

/// Number of landmarks per detected hand.
pub const HAND_LANDMARK_COUNT: usize = 21;

/// A single tracked point in normalized image coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    /// Relative depth. Carried through from the capability, not used for distance.
    pub z: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Pixel position for a frame of the given size.
    pub fn to_pixel(&self, width: u32, height: u32) -> (i32, i32) {
        (
            (self.x * width as f64).round() as i32,
            (self.y * height as f64).round() as i32,
        )
    }
}

/// Landmark indices in the MediaPipe hand model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum HandLandmark {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexFingerMcp = 5,
    IndexFingerPip = 6,
    IndexFingerDip = 7,
    IndexFingerTip = 8,
    MiddleFingerMcp = 9,
    MiddleFingerPip = 10,
    MiddleFingerDip = 11,
    MiddleFingerTip = 12,
    RingFingerMcp = 13,
    RingFingerPip = 14,
    RingFingerDip = 15,
    RingFingerTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

/// Skeleton edges between landmark indices, for drawing.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    (0, 5),
    (5, 6),
    (6, 7),
    (7, 8),
    (5, 9),
    (9, 10),
    (10, 11),
    (11, 12),
    (9, 13),
    (13, 14),
    (14, 15),
    (15, 16),
    (13, 17),
    (0, 17),
    (17, 18),
    (18, 19),
    (19, 20),
];

/// One hand detected in one frame.
///
/// No identity across frames: two detections in consecutive frames are unrelated values.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    landmarks: [Landmark; HAND_LANDMARK_COUNT],
    /// Raw side label as reported by the capability ("Left", "Right", or anything else).
    pub label: Option<String>,
    /// Capability confidence, when reported.
    pub score: Option<f32>,
}

impl Detection {
    /// Build a detection. Fails unless exactly 21 landmarks are supplied.
    pub fn new(landmarks: Vec<Landmark>, label: Option<String>) -> Result<Self> {
        let count = landmarks.len();
        let landmarks: [Landmark; HAND_LANDMARK_COUNT] = landmarks.try_into().map_err(|_| {
            anyhow!(
                "hand detection must carry {} landmarks, got {}",
                HAND_LANDMARK_COUNT,
                count
            )
        })?;
        Ok(Self {
            landmarks,
            label,
            score: None,
        })
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }

    pub fn landmark(&self, which: HandLandmark) -> Landmark {
        self.landmarks[which as usize]
    }

    pub fn landmarks(&self) -> &[Landmark; HAND_LANDMARK_COUNT] {
        &self.landmarks
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// All detections for one frame, in capability order.
#[derive(Clone, Debug, Default)]
pub struct HandFrame {
    /// Monotonic frame counter assigned by the source.
    pub index: u64,
    /// Frame size in pixels, when the capability reports it.
    pub size: Option<(u32, u32)>,
    pub detections: Vec<Detection>,
}
