//! Landmark sources.
//!
//! This module is the boundary to the hand-landmark capability:
//! - `stub://...`: synthetic two-hand source (demos, tests)
//! - `exec://`: spawn the configured landmarker and read its stdout
//! - `-`: JSON Lines on stdin
//! - `file://path` or a bare path: recorded JSON Lines session
//!
//! All sources produce `HandFrame`s of validated `Detection`s. A source that cannot
//! produce another frame returns `Ok(None)` at end of stream and `Err` when the
//! capability itself has failed; both end the run.

mod exec;
mod replay;
mod synthetic;
mod wire;

use anyhow::{anyhow, Result};
use std::path::Path;

pub use exec::{ExecSource, MIRROR_FLAG};
pub use replay::JsonLinesSource;
pub use synthetic::SyntheticSource;
pub use wire::{decode_frame, BoundaryFilter};

use crate::config::SourceSettings;
use crate::landmark::HandFrame;

/// A per-frame supplier of hand detections.
pub trait LandmarkSource {
    /// Source identifier for logs.
    fn name(&self) -> &str;

    /// Block until the next frame is available.
    fn next_frame(&mut self) -> Result<Option<HandFrame>>;
}

impl<S: LandmarkSource + ?Sized> LandmarkSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn next_frame(&mut self) -> Result<Option<HandFrame>> {
        (**self).next_frame()
    }
}

/// Open the source named by `settings.uri`.
pub fn open(settings: &SourceSettings, mirror: bool) -> Result<Box<dyn LandmarkSource>> {
    let filter = settings.filter();
    let uri = settings.uri.trim();
    if uri.starts_with("stub://") {
        return Ok(Box::new(SyntheticSource::new(uri)));
    }
    if uri.starts_with("exec://") {
        let command = settings
            .command
            .as_deref()
            .ok_or_else(|| anyhow!("exec:// source requires a landmarker command"))?;
        return Ok(Box::new(ExecSource::spawn(command, mirror, filter)?));
    }
    if uri == "-" {
        return Ok(Box::new(JsonLinesSource::stdin(filter)));
    }
    let path = uri.strip_prefix("file://").unwrap_or(uri);
    if path.is_empty() || path.contains("://") {
        return Err(anyhow!("unsupported landmark source '{}'", uri));
    }
    Ok(Box::new(JsonLinesSource::open(Path::new(path), filter)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn settings(uri: &str) -> SourceSettings {
        SourceSettings {
            uri: uri.to_string(),
            ..SourceSettings::default()
        }
    }

    #[test]
    fn opens_stub_sources() {
        let mut source = open(&settings("stub://demo"), true).unwrap();
        assert_eq!(source.name(), "stub://demo");
        assert!(source.next_frame().unwrap().is_some());
    }

    #[test]
    fn opens_replay_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{\"hands\":[]}}").unwrap();
        let uri = format!("file://{}", file.path().display());
        let mut source = open(&settings(&uri), true).unwrap();
        assert!(source.next_frame().unwrap().is_some());
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn rejects_unknown_schemes_and_missing_commands() {
        assert!(open(&settings("rtsp://camera"), true).is_err());
        assert!(open(&settings("exec://"), true).is_err());
        assert!(open(&settings("/definitely/not/here.jsonl"), true).is_err());
    }
}
