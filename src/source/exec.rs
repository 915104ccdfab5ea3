//! Landmarker subprocess source.
//!
//! Spawns an external landmarker (camera capture + hand model) and reads its frames
//! as JSON Lines from stdout. The helper owns the camera; when mirroring is enabled it
//! is started with `--mirror` so it flips each image before detection. The child is
//! killed when the source is dropped.

use anyhow::{anyhow, Context, Result};
use std::io::BufReader;
use std::process::{Child, ChildStdout, Command, Stdio};

use super::replay::JsonLinesSource;
use super::wire::BoundaryFilter;
use super::LandmarkSource;
use crate::landmark::HandFrame;

pub const MIRROR_FLAG: &str = "--mirror";

pub struct ExecSource {
    child: Child,
    frames: JsonLinesSource<BufReader<ChildStdout>>,
}

impl ExecSource {
    pub fn spawn(argv: &[String], mirror: bool, filter: BoundaryFilter) -> Result<Self> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| anyhow!("landmarker command must not be empty"))?;

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        if mirror {
            command.arg(MIRROR_FLAG);
        }

        log::info!("starting landmarker: {} {}", program, args.join(" "));
        let mut child = command
            .spawn()
            .with_context(|| format!("failed to start landmarker {}", program))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow!("landmarker stdout unavailable"))?;

        Ok(Self {
            child,
            frames: JsonLinesSource::new(
                BufReader::new(stdout),
                &format!("exec:{}", program),
                filter,
            ),
        })
    }

    pub fn id(&self) -> u32 {
        self.child.id()
    }
}

impl LandmarkSource for ExecSource {
    fn name(&self) -> &str {
        self.frames.name()
    }

    fn next_frame(&mut self) -> Result<Option<HandFrame>> {
        let frame = self.frames.next_frame()?;
        if frame.is_none() {
            match self.child.try_wait() {
                Ok(Some(status)) => log::info!("landmarker exited with {}", status),
                Ok(None) => log::info!("landmarker closed its output"),
                Err(err) => log::warn!("landmarker status unavailable: {}", err),
            }
        }
        Ok(frame)
    }
}

impl Drop for ExecSource {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
