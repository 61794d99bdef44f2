//! Stream metadata probing via ffprobe's JSON output.

use serde::Deserialize;
use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};
use crate::external;

#[derive(Debug, Default, Deserialize)]
pub struct ProbeReport {
    #[serde(default)]
    pub streams: Vec<StreamInfo>,
    #[serde(default)]
    pub format: Option<FormatInfo>,
}

#[derive(Debug, Deserialize)]
pub struct StreamInfo {
    #[serde(default)]
    pub codec_type: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct FormatInfo {
    // ffprobe reports duration as a decimal string
    #[serde(default)]
    pub duration: Option<String>,
}

impl ProbeReport {
    /// Dimensions of the first stream that carries geometry.
    pub fn video_dimensions(&self) -> Option<(u32, u32)> {
        self.streams
            .iter()
            .find_map(|s| Some((s.width?, s.height?)))
    }

    pub fn duration_seconds(&self) -> Option<f64> {
        self.format
            .as_ref()?
            .duration
            .as_ref()?
            .trim()
            .parse()
            .ok()
    }
}

/// External probe utility, behind a trait so the compiler and driver can be
/// exercised without a real ffprobe on the machine.
pub trait Prober {
    fn probe(&self, path: &Path) -> Result<ProbeReport>;
}

pub struct FfprobeProber;

impl Prober for FfprobeProber {
    fn probe(&self, path: &Path) -> Result<ProbeReport> {
        if external::find_tool("ffprobe").is_none() {
            return Err(Error::ProbeFailed(
                "ffprobe not found in PATH".to_string(),
            ));
        }

        let mut cmd = Command::new("ffprobe");
        cmd.args(["-v", "quiet", "-print_format", "json", "-show_format", "-show_streams"])
            .arg(path);

        let out = external::capture_output(&mut cmd)
            .map_err(|e| Error::ProbeFailed(e.to_string()))?;
        serde_json::from_str(&out)
            .map_err(|e| Error::ProbeFailed(format!("unparsable ffprobe output: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ffprobe_shape() {
        let raw = r#"{
            "streams": [
                {"codec_type": "video", "width": 640, "height": 360},
                {"codec_type": "audio"}
            ],
            "format": {"duration": "12.480000"}
        }"#;
        let report: ProbeReport = serde_json::from_str(raw).unwrap();
        assert_eq!(report.video_dimensions(), Some((640, 360)));
        assert_eq!(report.duration_seconds(), Some(12.48));
    }

    #[test]
    fn missing_geometry_yields_none() {
        let raw = r#"{"streams": [{"codec_type": "audio"}], "format": {}}"#;
        let report: ProbeReport = serde_json::from_str(raw).unwrap();
        assert_eq!(report.video_dimensions(), None);
        assert_eq!(report.duration_seconds(), None);
    }
}
