//! Actuators that shell out to an OS command.
//!
//! Each call launches one process with stdin/stdout/stderr detached and waits for it,
//! up to a timeout. Launch failure, non-zero exit and timeout are all reported as
//! errors; a timed-out child is killed and reaped before returning.

use anyhow::{anyhow, bail, Context, Result};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::actuate::control::{BrightnessControl, VolumeControl};

pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_millis(2000);
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Program plus arguments with `{percent}` / `{fraction}` placeholders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandTemplate {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandTemplate {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Build from a full argv (`["pactl", "set-sink-volume", ...]`).
    pub fn from_argv(argv: &[String]) -> Result<Self> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| anyhow!("actuator command must not be empty"))?;
        if program.trim().is_empty() {
            bail!("actuator command program must not be blank");
        }
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// `osascript -e "set volume output volume N"`
    pub fn macos_volume() -> Self {
        Self::new("osascript", &["-e", "set volume output volume {percent}"])
    }

    /// `brightness 0.NNN` (the Homebrew `brightness` CLI).
    pub fn macos_brightness() -> Self {
        Self::new("brightness", &["{fraction}"])
    }

    pub fn linux_volume() -> Self {
        Self::new("pactl", &["set-sink-volume", "@DEFAULT_SINK@", "{percent}%"])
    }

    pub fn linux_brightness() -> Self {
        Self::new("brightnessctl", &["--quiet", "set", "{percent}%"])
    }

    /// Substitute placeholders in every argument.
    pub fn render(&self, percent: u8, fraction: f64) -> Vec<String> {
        let percent = percent.to_string();
        let fraction = format!("{:.3}", fraction);
        self.args
            .iter()
            .map(|arg| {
                arg.replace("{percent}", &percent)
                    .replace("{fraction}", &fraction)
            })
            .collect()
    }
}

/// Runs a `CommandTemplate` per actuation.
#[derive(Clone, Debug)]
pub struct CommandControl {
    template: CommandTemplate,
    timeout: Duration,
}

impl CommandControl {
    pub fn new(template: CommandTemplate) -> Self {
        Self {
            template,
            timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn template(&self) -> &CommandTemplate {
        &self.template
    }

    fn run(&self, args: Vec<String>) -> Result<()> {
        let program = &self.template.program;
        log::debug!("actuator exec: {} {}", program, args.join(" "));
        let mut child = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to launch {}", program))?;

        let deadline = Instant::now() + self.timeout;
        loop {
            match child
                .try_wait()
                .with_context(|| format!("failed to wait for {}", program))?
            {
                Some(status) if status.success() => return Ok(()),
                Some(status) => bail!("{} exited with {}", program, status),
                None if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    bail!(
                        "{} timed out after {} ms",
                        program,
                        self.timeout.as_millis()
                    );
                }
                None => thread::sleep(POLL_INTERVAL),
            }
        }
    }
}

impl VolumeControl for CommandControl {
    fn name(&self) -> &'static str {
        "command"
    }

    fn set_volume(&mut self, percent: u8) -> Result<()> {
        let percent = percent.min(100);
        self.run(self.template.render(percent, percent as f64 / 100.0))
    }
}

impl BrightnessControl for CommandControl {
    fn name(&self) -> &'static str {
        "command"
    }

    fn set_brightness(&mut self, level: f64) -> Result<()> {
        let level = if level.is_nan() {
            0.0
        } else {
            level.clamp(0.0, 1.0)
        };
        let percent = (level * 100.0).round() as u8;
        self.run(self.template.render(percent, level))
    }
}
