//! The closed set of effects and what each one supports.

use crate::media::MediaType;

/// Every effect the dispatcher knows about. Closed enum so the pipeline
/// compiler's dispatch is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Speed,
    Pitch,
    Reverb,
    Reverse,
    Volume,
    Bass,
    Mute,
    Crush,
    Hflip,
    Vflip,
    Watermark,
    Invert,
    Contrast,
    Grayscale,
    Brightness,
    Saturation,
    Pixelate,
    Blur,
    Fps,
    Sepia,
    Rlag,
    Shake,
    Fisheye,
    Deepfry,
    Hue,
    Huesaturation,
    Zoom,
    Sharpen,
    Vbr,
    Abr,
    Sfx,
}

impl Effect {
    pub fn from_name(name: &str) -> Option<Effect> {
        use Effect::*;
        Some(match name {
            "speed" => Speed,
            "pitch" => Pitch,
            "reverb" => Reverb,
            "reverse" => Reverse,
            "volume" => Volume,
            "bass" => Bass,
            "mute" => Mute,
            "crush" => Crush,
            "hflip" => Hflip,
            "vflip" => Vflip,
            "watermark" => Watermark,
            "invert" => Invert,
            "contrast" => Contrast,
            "grayscale" => Grayscale,
            "brightness" => Brightness,
            "saturation" => Saturation,
            "pixelate" => Pixelate,
            "blur" => Blur,
            "fps" => Fps,
            "sepia" => Sepia,
            "rlag" => Rlag,
            "shake" => Shake,
            "fisheye" => Fisheye,
            "deepfry" => Deepfry,
            "hue" => Hue,
            "huesaturation" => Huesaturation,
            "zoom" => Zoom,
            "sharpen" => Sharpen,
            "vbr" => Vbr,
            "abr" => Abr,
            "sfx" => Sfx,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        use Effect::*;
        match self {
            Speed => "speed",
            Pitch => "pitch",
            Reverb => "reverb",
            Reverse => "reverse",
            Volume => "volume",
            Bass => "bass",
            Mute => "mute",
            Crush => "crush",
            Hflip => "hflip",
            Vflip => "vflip",
            Watermark => "watermark",
            Invert => "invert",
            Contrast => "contrast",
            Grayscale => "grayscale",
            Brightness => "brightness",
            Saturation => "saturation",
            Pixelate => "pixelate",
            Blur => "blur",
            Fps => "fps",
            Sepia => "sepia",
            Rlag => "rlag",
            Shake => "shake",
            Fisheye => "fisheye",
            Deepfry => "deepfry",
            Hue => "hue",
            Huesaturation => "huesaturation",
            Zoom => "zoom",
            Sharpen => "sharpen",
            Vbr => "vbr",
            Abr => "abr",
            Sfx => "sfx",
        }
    }

    /// Capability table: which media types an effect is defined for.
    /// Everything is defined for video; only the audio-capable subset is
    /// defined for audio files.
    pub fn supports(self, media: MediaType) -> bool {
        use Effect::*;
        match media {
            MediaType::Video => true,
            MediaType::Audio => matches!(
                self,
                Speed | Pitch | Reverb | Reverse | Volume | Bass | Mute | Crush | Sfx | Abr
            ),
            MediaType::Unknown => false,
        }
    }
}

/// Clamp an optional raw parameter into `[min, max]`.
///
/// Absent stays absent; a value that does not parse as a number also comes
/// back as `None` so the caller can report it against the effect.
pub fn constrain(value: Option<&str>, min: f64, max: f64) -> Option<f64> {
    let raw = value?;
    raw.trim().parse::<f64>().ok().map(|v| v.clamp(min, max))
}
