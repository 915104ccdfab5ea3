//! JSON Lines wire format shared by the replay and exec sources.
//!
//! One object per frame:
//!
//! ```json
//! {"width":640,"height":480,"hands":[{"handedness":"Left","score":0.93,"landmarks":[{"x":0.41,"y":0.52,"z":-0.01}]}]}
//! ```
//!
//! (`landmarks` holds 21 entries in practice.) Hands are validated here, once, before
//! anything downstream sees them.

use anyhow::{anyhow, Result};
use serde::Deserialize;

use crate::landmark::{Detection, HandFrame, Landmark};

#[derive(Debug, Deserialize)]
struct FrameJson {
    #[serde(default)]
    hands: Vec<HandJson>,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HandJson {
    #[serde(default)]
    handedness: Option<String>,
    #[serde(default)]
    score: Option<f32>,
    landmarks: Vec<LandmarkJson>,
}

#[derive(Debug, Deserialize)]
struct LandmarkJson {
    x: f64,
    y: f64,
    #[serde(default)]
    z: f64,
}

/// Acceptance rules applied to every hand at the source boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryFilter {
    /// Hands with a reported score below this are dropped. Hands without a score are kept.
    pub min_score: f32,
    /// At most this many hands per frame are kept, in capability order.
    pub max_hands: usize,
}

impl Default for BoundaryFilter {
    fn default() -> Self {
        Self {
            min_score: 0.7,
            max_hands: 2,
        }
    }
}

/// Decode one line into a frame.
///
/// A malformed line or a capability-reported `error` is an error; a malformed hand is not.
pub fn decode_frame(line: &str, index: u64, filter: &BoundaryFilter) -> Result<HandFrame> {
    let raw: FrameJson = serde_json::from_str(line)
        .map_err(|e| anyhow!("invalid landmark frame #{}: {}", index, e))?;

    if let Some(error) = raw.error.as_deref().filter(|e| !e.is_empty()) {
        return Err(anyhow!(
            "landmark capability failed on frame #{}: {}",
            index,
            error
        ));
    }

    let size = raw.width.zip(raw.height);
    let mut detections = Vec::with_capacity(raw.hands.len().min(filter.max_hands));
    for (hand_idx, hand) in raw.hands.into_iter().enumerate() {
        if detections.len() >= filter.max_hands {
            log::debug!(
                "frame #{}: dropping hand {} beyond max_hands={}",
                index,
                hand_idx,
                filter.max_hands
            );
            break;
        }
        if let Some(score) = hand.score {
            if score < filter.min_score {
                log::debug!(
                    "frame #{}: dropping hand {} (score {:.2} < {:.2})",
                    index,
                    hand_idx,
                    score,
                    filter.min_score
                );
                continue;
            }
        }
        let landmarks = hand
            .landmarks
            .into_iter()
            .map(|lm| Landmark {
                x: lm.x,
                y: lm.y,
                z: lm.z,
            })
            .collect();
        match Detection::new(landmarks, hand.handedness) {
            Ok(detection) => {
                let detection = match hand.score {
                    Some(score) => detection.with_score(score),
                    None => detection,
                };
                detections.push(detection);
            }
            Err(err) => log::warn!("frame #{}: dropping hand {}: {}", index, hand_idx, err),
        }
    }

    Ok(HandFrame {
        index,
        size,
        detections,
    })
}
