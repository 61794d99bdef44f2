//! Sound-effect library lookup.
//!
//! The library is an external collaborator: it gets the working audio track
//! and a numeric selector, and yields the sample file to mix in. The
//! directory-backed implementation resolves `sfx_<selector>.wav` inside a
//! configured library directory.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub trait SoundLibrary {
    fn select(&self, working_audio: &Path, selector: u32) -> Result<PathBuf>;
}

pub struct DirLibrary {
    dir: PathBuf,
}

impl DirLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> DirLibrary {
        DirLibrary { dir: dir.into() }
    }
}

impl SoundLibrary for DirLibrary {
    fn select(&self, _working_audio: &Path, selector: u32) -> Result<PathBuf> {
        let candidate = self.dir.join(format!("sfx_{}.wav", selector));
        if candidate.exists() {
            Ok(candidate)
        } else {
            Err(Error::SampleNotFound(candidate))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_existing_sample() {
        let dir = tempfile::tempdir().unwrap();
        let sample = dir.path().join("sfx_7.wav");
        std::fs::write(&sample, b"RIFF").unwrap();

        let lib = DirLibrary::new(dir.path());
        let found = lib.select(Path::new("working.wav"), 7).unwrap();
        assert_eq!(found, sample);
    }

    #[test]
    fn missing_sample_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let lib = DirLibrary::new(dir.path());
        let err = lib.select(Path::new("working.wav"), 3).unwrap_err();
        assert!(matches!(err, Error::SampleNotFound(_)));
    }
}
