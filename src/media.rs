use std::path::Path;

const AUDIO_EXTS: [&str; 5] = ["wav", "mp3", "flac", "ogg", "m4a"];
const VIDEO_EXTS: [&str; 5] = ["mp4", "mov", "mkv", "avi", "webm"];

/// Input media category, derived once per run from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Audio,
    Video,
    Unknown,
}

impl MediaType {
    pub fn from_path(path: &Path) -> MediaType {
        let ext = match path.extension() {
            Some(ext) => ext.to_string_lossy().to_lowercase(),
            None => return MediaType::Unknown,
        };
        if AUDIO_EXTS.contains(&ext.as_str()) {
            MediaType::Audio
        } else if VIDEO_EXTS.contains(&ext.as_str()) {
            MediaType::Video
        } else {
            MediaType::Unknown
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MediaType::Audio => "audio",
            MediaType::Video => "video",
            MediaType::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_extensions() {
        for name in ["a.wav", "a.mp3", "a.flac", "a.ogg", "a.m4a"] {
            assert_eq!(MediaType::from_path(Path::new(name)), MediaType::Audio);
        }
    }

    #[test]
    fn video_extensions() {
        for name in ["a.mp4", "a.mov", "a.mkv", "a.avi", "a.webm"] {
            assert_eq!(MediaType::from_path(Path::new(name)), MediaType::Video);
        }
    }

    #[test]
    fn extension_is_case_insensitive() {
        assert_eq!(MediaType::from_path(Path::new("clip.MP4")), MediaType::Video);
        assert_eq!(MediaType::from_path(Path::new("song.WaV")), MediaType::Audio);
    }

    #[test]
    fn unknown_extensions() {
        assert_eq!(MediaType::from_path(Path::new("doc.txt")), MediaType::Unknown);
        assert_eq!(MediaType::from_path(Path::new("noext")), MediaType::Unknown);
    }
}
