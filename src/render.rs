//! Render & Overlay Driver.
//!
//! One primary render, then — if an `sfx` directive armed an overlay — a
//! second pass that extracts the working audio, looks up the sample, remuxes
//! into a side file and atomically renames it over the primary output. A
//! failed overlay never destroys a successful primary render.

use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::{Engine, OverlayJob, RenderJob};
use crate::error::{Error, Result};
use crate::graph::FilterGraph;
use crate::media::MediaType;
use crate::probe::Prober;
use crate::progress;
use crate::sfx::SoundLibrary;

/// Deletes tracked run-owned temporaries on every exit path.
struct TempGuard {
    paths: Vec<PathBuf>,
    keep: bool,
}

impl TempGuard {
    fn new(keep: bool) -> TempGuard {
        TempGuard {
            paths: Vec::new(),
            keep,
        }
    }

    fn track(&mut self, path: PathBuf) {
        self.paths.push(path);
    }
}

impl Drop for TempGuard {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        for path in &self.paths {
            if path.exists() {
                let _ = fs::remove_file(path);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    graph: &FilterGraph,
    media: MediaType,
    input: &Path,
    output: &Path,
    engine: &dyn Engine,
    prober: &dyn Prober,
    library: &dyn SoundLibrary,
    keep_temp: bool,
) -> Result<()> {
    let audio_only = media == MediaType::Audio;

    let job = RenderJob {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        video_filters: (!graph.video.is_empty()).then(|| graph.video.to_string()),
        audio_filters: (!graph.audio.is_empty()).then(|| graph.audio.to_string()),
        video_bitrate: graph.video_bitrate,
        audio_bitrate: graph.audio_bitrate,
        audio_only,
    };
    engine.render(&job)?;

    let Some(overlay) = graph.overlay else {
        return Ok(());
    };

    let dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let input_stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string());
    let output_stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());

    let working = dir.join(format!("sfx_{}.wav", input_stem));
    let side = dir.join(format!("{} (sfx).mp4", output_stem));

    let mut guard = TempGuard::new(keep_temp);
    guard.track(working.clone());
    guard.track(side.clone());

    // Working audio: the input run through the accumulated audio chain.
    let extract = RenderJob {
        input: input.to_path_buf(),
        output: working.clone(),
        video_filters: None,
        audio_filters: (!graph.audio.is_empty()).then(|| graph.audio.to_string()),
        video_bitrate: graph.video_bitrate,
        audio_bitrate: graph.audio_bitrate,
        audio_only: true,
    };
    engine
        .render(&extract)
        .map_err(|e| Error::OverlayFailed(e.to_string()))?;

    let sample = library.select(&working, overlay.selector)?;

    // Truncate the sample to the rendered output's duration if it is longer.
    // A failed probe here is tolerable; the mix then runs unbounded.
    let duration = prober.probe(output).ok().and_then(|r| r.duration_seconds());
    if duration.is_none() {
        progress::print_warn("could not probe output duration; sample will not be truncated");
    }

    let mix = OverlayJob {
        rendered: output.to_path_buf(),
        sample,
        dest: side.clone(),
        duration,
        audio_only,
    };
    engine
        .mix(&mix)
        .map_err(|e| Error::OverlayFailed(e.to_string()))?;

    // Swap in place only after the side file is complete.
    fs::rename(&side, output)
        .map_err(|e| Error::OverlayFailed(format!("failed to replace output: {}", e)))?;

    Ok(())
}
