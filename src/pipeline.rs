//! Per-frame gesture-to-control pipeline.
//!
//! For every detection of a frame, in capability order:
//! pinch distance → volume and brightness mappings → resolved side → dispatch → overlay.
//!
//! Frames are independent: nothing computed for one frame is consulted for the next.
//! Detections within a frame are independent as well, so two hands resolving to the
//! same side both actuate and the later one's value is what the system ends up with.

use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::actuate::{BrightnessControl, VolumeControl};
use crate::dispatch::{ControlDispatcher, ControlOutcome};
use crate::features::pinch_distance;
use crate::handedness::{resolve, Side};
use crate::landmark::{Detection, HandFrame};
use crate::mapping::RangeMapper;
use crate::overlay::{HandOverlay, Readout};
use crate::render::OverlaySink;
use crate::source::LandmarkSource;

/// Everything the pipeline derived from one detection.
#[derive(Clone, Debug, Serialize)]
pub struct HandReport {
    /// Raw capability label before mirroring correction.
    pub raw_label: Option<String>,
    pub distance: f64,
    pub volume: f64,
    pub brightness: f64,
    pub side: Side,
    pub outcome: Option<ControlOutcome>,
    pub overlay: HandOverlay,
}

/// Everything the pipeline derived from one frame.
#[derive(Clone, Debug, Serialize)]
pub struct FrameReport {
    pub index: u64,
    pub size: Option<(u32, u32)>,
    pub hands: Vec<HandReport>,
}

impl FrameReport {
    pub fn outcomes(&self) -> impl Iterator<Item = &ControlOutcome> {
        self.hands.iter().filter_map(|hand| hand.outcome.as_ref())
    }
}

pub struct FrameOrchestrator<V, B> {
    mapper: RangeMapper,
    mirrored: bool,
    dispatcher: ControlDispatcher<V, B>,
}

impl<V: VolumeControl, B: BrightnessControl> FrameOrchestrator<V, B> {
    pub fn new(mapper: RangeMapper, mirrored: bool, dispatcher: ControlDispatcher<V, B>) -> Self {
        Self {
            mapper,
            mirrored,
            dispatcher,
        }
    }

    pub fn mirrored(&self) -> bool {
        self.mirrored
    }

    pub fn dispatcher(&self) -> &ControlDispatcher<V, B> {
        &self.dispatcher
    }

    pub fn into_dispatcher(self) -> ControlDispatcher<V, B> {
        self.dispatcher
    }

    /// Process every detection of one frame.
    pub fn process_frame(&mut self, frame: &HandFrame) -> FrameReport {
        let hands = frame
            .detections
            .iter()
            .map(|detection| self.process_detection(detection, frame.size))
            .collect();
        FrameReport {
            index: frame.index,
            size: frame.size,
            hands,
        }
    }

    fn process_detection(
        &mut self,
        detection: &Detection,
        size: Option<(u32, u32)>,
    ) -> HandReport {
        let distance = pinch_distance(detection);
        let volume = self.mapper.to_volume(distance);
        let brightness = self.mapper.to_brightness(distance);
        let side = resolve(detection.label(), self.mirrored);
        let outcome = self.dispatcher.dispatch(side, volume, brightness);

        let overlay = HandOverlay::compose(
            detection,
            size,
            Readout {
                distance,
                volume,
                brightness,
                side,
                outcome: outcome.as_ref(),
            },
        );

        HandReport {
            raw_label: detection.label.clone(),
            distance,
            volume,
            brightness,
            side,
            outcome,
            overlay,
        }
    }

    /// Pull frames from `source` until it ends, `stop` is raised, or `max_frames` is reached.
    ///
    /// A source or renderer error ends the run and is returned; actuation failures never do.
    pub fn run<S, K>(
        &mut self,
        source: &mut S,
        sink: &mut K,
        stop: &AtomicBool,
        options: &RunOptions,
    ) -> Result<RunStats>
    where
        S: LandmarkSource + ?Sized,
        K: OverlaySink + ?Sized,
    {
        let mut stats = RunStats::default();
        let mut last_health_log = Instant::now();
        let started = Instant::now();

        log::info!(
            "gesture loop running: source={} mirror={}",
            source.name(),
            self.mirrored
        );

        let result = loop {
            if stop.load(Ordering::SeqCst) {
                break Ok(StopReason::Signal);
            }
            if options.max_frames.is_some_and(|max| stats.frames >= max) {
                break Ok(StopReason::FrameLimit);
            }

            let frame = match source
                .next_frame()
                .with_context(|| format!("landmark source {} failed", source.name()))
            {
                Ok(Some(frame)) => frame,
                Ok(None) => break Ok(StopReason::EndOfStream),
                Err(err) => break Err(err),
            };

            let report = self.process_frame(&frame);
            stats.record(&report);
            log::debug!(
                "frame #{}: {} hand(s) {:?}",
                report.index,
                report.hands.len(),
                report
                    .hands
                    .iter()
                    .map(|hand| (hand.side, hand.distance))
                    .collect::<Vec<_>>()
            );

            if let Err(err) = sink.present(&report) {
                break Err(err.context("overlay renderer failed"));
            }

            if last_health_log.elapsed() >= options.health_interval {
                log::info!("{}", stats.summary_line(started.elapsed()));
                last_health_log = Instant::now();
            }
        };

        stats.elapsed = started.elapsed();
        match result {
            Ok(reason) => {
                stats.stop_reason = Some(reason);
                log::info!(
                    "gesture loop stopped ({}): {}",
                    reason,
                    stats.summary_line(stats.elapsed)
                );
                Ok(stats)
            }
            Err(err) => {
                log::error!("gesture loop aborted: {}", stats.summary_line(stats.elapsed));
                Err(err)
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct RunOptions {
    pub max_frames: Option<u64>,
    pub health_interval: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            max_frames: None,
            health_interval: Duration::from_secs(5),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    Signal,
    EndOfStream,
    FrameLimit,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::Signal => f.write_str("stop signal"),
            StopReason::EndOfStream => f.write_str("end of stream"),
            StopReason::FrameLimit => f.write_str("frame limit"),
        }
    }
}

/// Counters kept by the run loop for health logging.
#[derive(Clone, Debug, Default)]
pub struct RunStats {
    pub frames: u64,
    pub detections: u64,
    pub unknown: u64,
    pub actuations_ok: u64,
    pub actuations_failed: u64,
    pub elapsed: Duration,
    pub stop_reason: Option<StopReason>,
}

impl RunStats {
    fn record(&mut self, report: &FrameReport) {
        self.frames += 1;
        self.detections += report.hands.len() as u64;
        for hand in &report.hands {
            match &hand.outcome {
                Some(outcome) if outcome.ok => self.actuations_ok += 1,
                Some(_) => self.actuations_failed += 1,
                None => self.unknown += 1,
            }
        }
    }

    pub fn summary_line(&self, elapsed: Duration) -> String {
        let secs = elapsed.as_secs_f64();
        let fps = if secs > 0.0 {
            self.frames as f64 / secs
        } else {
            0.0
        };
        format!(
            "frames={} ({:.1} fps) hands={} unknown={} actuations ok={} failed={}",
            self.frames,
            fps,
            self.detections,
            self.unknown,
            self.actuations_ok,
            self.actuations_failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuate::DryRunControl;
    use crate::landmark::{Landmark, HAND_LANDMARK_COUNT};

    fn pinch(label: Option<&str>, thumb: (f64, f64), index: (f64, f64)) -> Detection {
        let mut points = vec![Landmark::new(0.5, 0.9); HAND_LANDMARK_COUNT];
        points[4] = Landmark::new(thumb.0, thumb.1);
        points[8] = Landmark::new(index.0, index.1);
        Detection::new(points, label.map(str::to_string)).unwrap()
    }

    fn orchestrator(mirrored: bool) -> FrameOrchestrator<DryRunControl, DryRunControl> {
        FrameOrchestrator::new(
            RangeMapper::default(),
            mirrored,
            ControlDispatcher::new(DryRunControl::new(), DryRunControl::new()),
        )
    }

    #[test]
    fn computes_both_mappings_for_every_hand() {
        let mut orch = orchestrator(true);
        let frame = HandFrame {
            index: 0,
            size: None,
            detections: vec![pinch(None, (0.0, 0.1), (0.5, 0.1))],
        };
        let report = orch.process_frame(&frame);
        let hand = &report.hands[0];
        assert_eq!(hand.side, Side::Unknown);
        assert_eq!(hand.volume, 100.0);
        assert_eq!(hand.brightness, 1.0);
        assert!(hand.outcome.is_none());
        assert_eq!(orch.dispatcher().volume_control().calls(), 0);
        assert_eq!(orch.dispatcher().brightness_control().calls(), 0);
    }

    #[test]
    fn routes_each_hand_independently() {
        let mut orch = orchestrator(true);
        let frame = HandFrame {
            index: 7,
            size: Some((640, 480)),
            detections: vec![
                pinch(Some("Right"), (0.3, 0.5), (0.34, 0.5)),
                pinch(Some("Left"), (0.3, 0.5), (0.34, 0.5)),
                pinch(Some("Right"), (0.3, 0.5), (0.5, 0.5)),
            ],
        };
        let report = orch.process_frame(&frame);
        let sides: Vec<_> = report.hands.iter().map(|h| h.side).collect();
        assert_eq!(sides, vec![Side::Left, Side::Right, Side::Left]);
        assert_eq!(report.outcomes().count(), 3);
        assert_eq!(orch.dispatcher().volume_control().calls(), 2);
        assert_eq!(orch.dispatcher().brightness_control().calls(), 1);
        assert_eq!(report.index, 7);
        assert_eq!(report.size, Some((640, 480)));
    }

    #[test]
    fn run_stops_on_signal_before_pulling() {
        struct Exploding;
        impl LandmarkSource for Exploding {
            fn name(&self) -> &str {
                "exploding"
            }
            fn next_frame(&mut self) -> Result<Option<HandFrame>> {
                anyhow::bail!("should not be polled")
            }
        }

        let mut orch = orchestrator(true);
        let stop = AtomicBool::new(true);
        let mut sink = crate::render::LogSink;
        let stats = orch
            .run(&mut Exploding, &mut sink, &stop, &RunOptions::default())
            .unwrap();
        assert_eq!(stats.frames, 0);
        assert_eq!(stats.stop_reason, Some(StopReason::Signal));
    }

    #[test]
    fn stats_summary_counts_outcomes() {
        let mut stats = RunStats::default();
        let mut orch = orchestrator(false);
        let frame = HandFrame {
            index: 0,
            size: None,
            detections: vec![
                pinch(Some("Left"), (0.1, 0.1), (0.2, 0.1)),
                pinch(Some("Both"), (0.1, 0.1), (0.2, 0.1)),
            ],
        };
        stats.record(&orch.process_frame(&frame));
        assert_eq!(stats.frames, 1);
        assert_eq!(stats.detections, 2);
        assert_eq!(stats.actuations_ok, 1);
        assert_eq!(stats.unknown, 1);
        assert!(stats
            .summary_line(Duration::from_secs(1))
            .starts_with("frames=1 (1.0 fps) hands=2 unknown=1"));
    }
}
