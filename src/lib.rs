//! Gesture Control
//!
//! Drives system volume and display brightness from a thumb-to-index pinch, using
//! hand landmarks from an external detection capability.
//!
//! # Architecture
//!
//! Each frame is processed on its own, top to bottom:
//!
//! 1. **Source**: the landmark capability yields zero or more hands (21 landmarks each,
//!    optional raw "Left"/"Right" label), validated once at the boundary.
//! 2. **Features**: thumb tip to index tip distance in the normalized image plane.
//! 3. **Mapping**: clamped linear interpolation onto volume (0..100) and brightness
//!    (0.05..1.0). Both are computed for every hand.
//! 4. **Handedness**: the raw label, swapped when the view is mirrored.
//! 5. **Dispatch**: left hand → volume, right hand → brightness, unknown → nothing.
//!    Actuator failures become outcomes, never errors.
//! 6. **Overlay**: four readout lines and the hand skeleton for an external renderer.
//!
//! # Module Structure
//!
//! - `landmark`, `features`, `mapping`, `handedness`: pure per-hand computations
//! - `dispatch`, `actuate`: side routing and the OS actuators behind it
//! - `overlay`, `render`: feedback composition and sinks
//! - `pipeline`: the per-frame orchestrator and the run loop
//! - `source`: landmark capability adapters
//! - `config`: file + environment configuration

pub mod actuate;
pub mod config;
pub mod dispatch;
pub mod features;
pub mod handedness;
pub mod landmark;
pub mod mapping;
pub mod overlay;
pub mod pipeline;
pub mod render;
pub mod source;

pub use actuate::{
    build_controls, ActuatorBackend, BrightnessControl, CommandControl, CommandTemplate, Control,
    DryRunControl, VolumeControl,
};
pub use config::{ActuatorSettings, GestureConfig, SourceSettings};
pub use dispatch::{ControlDispatcher, ControlOutcome};
pub use features::{distance, pinch_distance};
pub use handedness::{resolve, Side};
pub use landmark::{Detection, HandFrame, HandLandmark, Landmark, HAND_LANDMARK_COUNT};
pub use mapping::{to_brightness, to_volume, RangeMap, RangeMapper};
pub use overlay::{HandOverlay, OverlayLine};
pub use pipeline::{FrameOrchestrator, FrameReport, HandReport, RunOptions, RunStats, StopReason};
pub use render::{JsonLinesSink, LogSink, OverlaySink};
pub use source::{BoundaryFilter, LandmarkSource};
