// ============================================================================
// outline-core/src/probe.rs
// ============================================================================
//
// DURATION PROBING: Container Duration Lookup via ffprobe
//
// This module asks ffprobe for the container-level duration of a media file.
// Callers only ever see a number of seconds: every failure (missing tool,
// missing file, non-media content, garbage output, timeout) is folded into
// 0.0 at the trait boundary.
//
// KEY COMPONENTS:
// - DurationProber: trait the outline parser depends on
// - FfprobeProber: production implementation spawning ffprobe
// - ProbeError: internal failure taxonomy, traced at debug level only

use std::io;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::config::{DEFAULT_FFPROBE_PROGRAM, ParserConfig};

/// Interval between child status checks while a timeout is armed.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Reasons a probe produced no usable duration.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Error waiting for probe process: {0}")]
    Wait(#[source] io::Error),

    #[error("Probe exited with status {status}: {stderr}")]
    NonZeroExit { status: ExitStatus, stderr: String },

    #[error("Probe timed out after {0:?}")]
    Timeout(Duration),

    #[error("Probe output is not a duration: {0:?}")]
    InvalidOutput(String),
}

/// Something that can tell how long a media file plays.
///
/// Implementations must never fail outward; a file whose duration cannot be
/// determined reports `0.0`.
pub trait DurationProber {
    fn probe_duration(&self, path: &Path) -> f64;
}

/// [`DurationProber`] backed by the ffprobe command-line tool.
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    program: String,
    timeout: Option<Duration>,
}

impl Default for FfprobeProber {
    fn default() -> Self {
        Self {
            program: DEFAULT_FFPROBE_PROGRAM.to_string(),
            timeout: None,
        }
    }
}

impl FfprobeProber {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prober using the program and timeout from a parser configuration.
    pub fn from_config(config: &ParserConfig) -> Self {
        Self {
            program: config.ffprobe_program.clone(),
            timeout: config.probe_timeout,
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Runs ffprobe once and parses its answer, keeping the failure reason.
    pub fn try_probe(&self, path: &Path) -> Result<f64, ProbeError> {
        let mut cmd = Command::new(&self.program);
        cmd.args([
            "-v",
            "quiet",
            "-show_entries",
            "format=duration",
            "-of",
            "csv=p=0",
        ])
        .arg(path)
        .stdin(Stdio::null());

        log::debug!("Probing duration: {:?}", cmd);

        let output = match self.timeout {
            Some(timeout) => self.run_with_timeout(&mut cmd, timeout)?,
            None => cmd.output().map_err(|source| ProbeError::Spawn {
                program: self.program.clone(),
                source,
            })?,
        };

        if !output.status.success() {
            return Err(ProbeError::NonZeroExit {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_duration_output(&String::from_utf8_lossy(&output.stdout))
    }

    fn run_with_timeout(&self, cmd: &mut Command, timeout: Duration) -> Result<Output, ProbeError> {
        let mut child = cmd
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ProbeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let start = Instant::now();
        loop {
            match child.try_wait() {
                Ok(Some(_)) => break,
                Ok(None) if start.elapsed() >= timeout => {
                    kill_and_reap(&mut child);
                    return Err(ProbeError::Timeout(timeout));
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    kill_and_reap(&mut child);
                    return Err(ProbeError::Wait(e));
                }
            }
        }

        child.wait_with_output().map_err(ProbeError::Wait)
    }
}

/// Kills an abandoned child and waits on it so no zombie is left behind.
fn kill_and_reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

impl DurationProber for FfprobeProber {
    fn probe_duration(&self, path: &Path) -> f64 {
        self.try_probe(path).unwrap_or_else(|err| {
            log::debug!("Duration probe failed for {}: {}", path.display(), err);
            0.0
        })
    }
}

/// Duration of `path` in seconds using ffprobe from `PATH`, or `0.0`.
pub fn probe_duration(path: &Path) -> f64 {
    FfprobeProber::new().probe_duration(path)
}

/// Parses ffprobe's bare `csv=p=0` answer.
fn parse_duration_output(stdout: &str) -> Result<f64, ProbeError> {
    let trimmed = stdout.trim();
    match trimmed.parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs >= 0.0 => Ok(secs),
        _ => Err(ProbeError::InvalidOutput(trimmed.to_string())),
    }
}
