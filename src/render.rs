//! Overlay sinks.
//!
//! The pipeline hands each frame's report to an `OverlaySink`. Drawing onto the video
//! window belongs to whatever sits behind the sink; the sinks here either log the
//! readouts or forward them as JSON Lines to an external renderer.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

use crate::overlay::HandOverlay;
use crate::pipeline::FrameReport;

pub trait OverlaySink {
    fn present(&mut self, report: &FrameReport) -> Result<()>;
}

impl<K: OverlaySink + ?Sized> OverlaySink for Box<K> {
    fn present(&mut self, report: &FrameReport) -> Result<()> {
        (**self).present(report)
    }
}

/// Writes the overlay text of every hand at `debug`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl OverlaySink for LogSink {
    fn present(&mut self, report: &FrameReport) -> Result<()> {
        for (i, hand) in report.hands.iter().enumerate() {
            log::debug!(
                "frame #{} hand {}: {}",
                report.index,
                i,
                hand.overlay.text_lines().collect::<Vec<_>>().join(" | ")
            );
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct FrameOverlayJson<'a> {
    frame: u64,
    size: Option<(u32, u32)>,
    hands: Vec<&'a HandOverlay>,
}

/// One JSON object per frame with every hand's overlay, for an external renderer.
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OverlaySink for JsonLinesSink<W> {
    fn present(&mut self, report: &FrameReport) -> Result<()> {
        let payload = FrameOverlayJson {
            frame: report.index,
            size: report.size,
            hands: report.hands.iter().map(|hand| &hand.overlay).collect(),
        };
        serde_json::to_writer(&mut self.writer, &payload).context("serialize overlay")?;
        self.writer.write_all(b"\n").context("write overlay")?;
        self.writer.flush().context("flush overlay")?;
        Ok(())
    }
}
