//! JSON Lines landmark source.
//!
//! Reads one frame per line from any buffered reader: a recorded session file, stdin,
//! or the stdout of a landmarker process (see `exec`). End of input ends the stream.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use super::wire::{decode_frame, BoundaryFilter};
use super::LandmarkSource;
use crate::landmark::HandFrame;

pub struct JsonLinesSource<R> {
    reader: R,
    label: String,
    filter: BoundaryFilter,
    frames_read: u64,
    line: String,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R, label: &str, filter: BoundaryFilter) -> Self {
        Self {
            reader,
            label: label.to_string(),
            filter,
            frames_read: 0,
            line: String::new(),
        }
    }

    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }
}

impl JsonLinesSource<BufReader<File>> {
    pub fn open(path: &Path, filter: BoundaryFilter) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open landmark replay {}", path.display()))?;
        Ok(Self::new(
            BufReader::new(file),
            &format!("file:{}", path.display()),
            filter,
        ))
    }
}

impl JsonLinesSource<BufReader<io::Stdin>> {
    pub fn stdin(filter: BoundaryFilter) -> Self {
        Self::new(BufReader::new(io::stdin()), "stdin", filter)
    }
}

impl<R: BufRead> LandmarkSource for JsonLinesSource<R> {
    fn name(&self) -> &str {
        &self.label
    }

    fn next_frame(&mut self) -> Result<Option<HandFrame>> {
        loop {
            self.line.clear();
            let read = self
                .reader
                .read_line(&mut self.line)
                .with_context(|| format!("failed to read {}", self.label))?;
            if read == 0 {
                return Ok(None);
            }
            let trimmed = self.line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let frame = decode_frame(trimmed, self.frames_read, &self.filter)?;
            self.frames_read += 1;
            return Ok(Some(frame));
        }
    }
}
