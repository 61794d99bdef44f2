//! The external media engine, behind a trait so the driver can be tested
//! with a double that never spawns a process.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};
use crate::external;
use crate::progress::Spinner;

/// One primary render: compiled chains plus output settings.
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub video_filters: Option<String>,
    pub audio_filters: Option<String>,
    pub video_bitrate: u32,
    pub audio_bitrate: u32,
    pub audio_only: bool,
}

/// The overlay remux: re-open the rendered file, swap in the sample as the
/// audio track (truncated to the output's duration), write to `dest`.
#[derive(Debug, Clone)]
pub struct OverlayJob {
    pub rendered: PathBuf,
    pub sample: PathBuf,
    pub dest: PathBuf,
    pub duration: Option<f64>,
    pub audio_only: bool,
}

pub trait Engine {
    fn render(&self, job: &RenderJob) -> Result<()>;
    fn mix(&self, job: &OverlayJob) -> Result<()>;
}

pub struct FfmpegEngine;

impl FfmpegEngine {
    fn run(&self, cmd: &mut Command, what: &str, output: &Path) -> Result<()> {
        let spinner = Spinner::new(what);
        let failure = external::run_engine_command(cmd)
            .map_err(|e| Error::EngineFailed(e.to_string()))?;

        match failure {
            None => {
                spinner.finish_success();
                Ok(())
            }
            Some(diag) => {
                spinner.finish_error();
                // Do not leave a partial file at the caller's output path.
                if output.exists() {
                    let _ = fs::remove_file(output);
                }
                Err(Error::EngineFailed(diag))
            }
        }
    }
}

impl Engine for FfmpegEngine {
    fn render(&self, job: &RenderJob) -> Result<()> {
        let mut cmd = Command::new("ffmpeg");
        cmd.args(["-hide_banner", "-loglevel", "error", "-y", "-i"])
            .arg(&job.input);

        if job.audio_only {
            if let Some(af) = &job.audio_filters {
                cmd.arg("-af").arg(af);
            }
            cmd.arg("-b:a").arg(job.audio_bitrate.to_string());
        } else {
            if let Some(vf) = &job.video_filters {
                cmd.arg("-vf").arg(vf);
            }
            if let Some(af) = &job.audio_filters {
                cmd.arg("-af").arg(af);
            }
            cmd.args(["-c:v", "libx264"])
                .arg("-b:v")
                .arg(job.video_bitrate.to_string())
                .args(["-c:a", "aac"])
                .arg("-b:a")
                .arg(job.audio_bitrate.to_string());
        }
        cmd.arg(&job.output);

        self.run(&mut cmd, "Rendering", &job.output)
    }

    fn mix(&self, job: &OverlayJob) -> Result<()> {
        let mut cmd = Command::new("ffmpeg");
        cmd.args(["-hide_banner", "-loglevel", "error", "-y"]);

        if job.audio_only {
            // Sample is the new audio program, truncated to the render length.
            cmd.arg("-i").arg(&job.sample);
            if let Some(dur) = job.duration {
                cmd.arg("-t").arg(format!("{}", dur));
            }
        } else {
            cmd.arg("-i").arg(&job.rendered);
            if let Some(dur) = job.duration {
                cmd.arg("-t").arg(format!("{}", dur));
            }
            cmd.arg("-i").arg(&job.sample);
            cmd.args(["-map", "0:v:0", "-map", "1:a:0", "-c:v", "copy", "-c:a", "aac", "-shortest"]);
        }
        cmd.arg(&job.dest);

        self.run(&mut cmd, "Mixing overlay", &job.dest)
    }
}
