//! The effect-pipeline compiler.
//!
//! Validation walks the request in order and rejects the whole run on the
//! first unknown name or type mismatch, before anything external is spawned.
//! Compilation then folds each directive onto the audio/video chains. Chains
//! are append-only, so directive order encodes filter order.

use std::path::Path;

use crate::directives::EffectRequest;
use crate::effects::{constrain, Effect};
use crate::error::{Error, Result};
use crate::graph::{FilterGraph, FilterOp, OverlayRequest};
use crate::media::MediaType;
use crate::probe::Prober;
use crate::progress;

/// Resolve every directive name against the capability table. Returns the
/// typed directive list the compiler consumes; the compiler itself assumes
/// everything it sees is valid.
pub fn validate(request: &EffectRequest, media: MediaType) -> Result<Vec<(Effect, String)>> {
    let mut resolved = Vec::with_capacity(request.len());
    for directive in request.iter() {
        let effect = Effect::from_name(&directive.name)
            .ok_or_else(|| Error::UnknownEffect(directive.name.clone()))?;
        if !effect.supports(media) {
            return Err(Error::TypeMismatch {
                effect: effect.name(),
                media: media.name(),
            });
        }
        resolved.push((effect, directive.value.clone()));
    }
    Ok(resolved)
}

pub fn compile(
    directives: &[(Effect, String)],
    media: MediaType,
    input: &Path,
    prober: &dyn Prober,
) -> Result<FilterGraph> {
    let mut compiler = Compiler {
        media,
        input,
        prober,
        graph: FilterGraph::default(),
    };
    for (effect, raw) in directives {
        compiler.apply(*effect, raw)?;
    }
    Ok(compiler.graph)
}

/// Single-owner accumulator for the two stream chains plus bitrate settings
/// and the optional overlay request.
struct Compiler<'a> {
    media: MediaType,
    input: &'a Path,
    prober: &'a dyn Prober,
    graph: FilterGraph,
}

impl Compiler<'_> {
    fn apply(&mut self, effect: Effect, raw: &str) -> Result<()> {
        match effect {
            Effect::Speed => {
                let v = num(effect, raw)?;
                if v == 0.0 {
                    return Err(bad(effect, raw));
                }
                if self.media == MediaType::Video {
                    self.graph
                        .video
                        .push(FilterOp::new("setpts").arg(format!("{}*PTS", 1.0 / v)));
                }
                self.graph.audio.push(FilterOp::new("atempo").arg(fnum(v)));
            }
            Effect::Pitch => {
                let v = num(effect, raw)?;
                self.graph
                    .audio
                    .push(FilterOp::new("rubberband").arg(format!("pitch={}", fnum(v / 100.0 + 1.0))));
            }
            Effect::Reverb => {
                let v = num(effect, raw)?;
                self.graph.audio.push(
                    FilterOp::new("aecho")
                        .arg("0.8")
                        .arg("0.9")
                        .arg(fnum(v))
                        .arg("0.3"),
                );
            }
            Effect::Reverse => {
                if self.media == MediaType::Video {
                    self.graph.video.push(FilterOp::new("reverse"));
                }
                self.graph.audio.push(FilterOp::new("areverse"));
            }
            Effect::Volume => {
                let v = num(effect, raw)?;
                self.graph
                    .audio
                    .push(FilterOp::new("volume").arg(fnum(v / 500.0 * 2.0)));
            }
            Effect::Bass => {
                let v = num(effect, raw)?;
                self.graph.audio.push(
                    FilterOp::new("equalizer")
                        .arg("f=60")
                        .arg("t=q")
                        .arg("w=1")
                        .arg(format!("g={}", fnum(v * 0.5))),
                );
            }
            Effect::Mute => {
                self.graph.audio.push(FilterOp::new("volume").arg("0"));
            }
            Effect::Crush => {
                let v = clamped(effect, raw, 1.0, 100.0)?;
                self.graph.audio.push(
                    FilterOp::new("acrusher")
                        .arg(format!("samples={}", (v * 0.32).floor() as i64))
                        .arg("bits=4")
                        .arg("mix=1"),
                );
            }
            Effect::Hflip => self.graph.video.push(FilterOp::new("hflip")),
            Effect::Vflip => self.graph.video.push(FilterOp::new("vflip")),
            Effect::Invert => self.graph.video.push(FilterOp::new("negate")),
            Effect::Contrast => self.eq_adjust("contrast", effect, raw)?,
            Effect::Brightness => self.eq_adjust("brightness", effect, raw)?,
            Effect::Saturation => self.eq_adjust("saturation", effect, raw)?,
            Effect::Grayscale => {
                self.graph.video.push(FilterOp::new("hue").arg("s=0"));
            }
            Effect::Pixelate => {
                let v = num(effect, raw)?;
                self.graph.video.push(
                    FilterOp::new("scale")
                        .arg(format!("iw/{}", fnum(v)))
                        .arg(format!("ih/{}", fnum(v))),
                );
                self.graph.video.push(
                    FilterOp::new("scale")
                        .arg("iw")
                        .arg("ih")
                        .arg("flags=neighbor"),
                );
            }
            Effect::Blur => {
                let v = num(effect, raw)?;
                self.graph
                    .video
                    .push(FilterOp::new("boxblur").arg(fnum(v)).arg("1"));
            }
            Effect::Fps => {
                let v = num(effect, raw)?;
                self.graph
                    .video
                    .push(FilterOp::new("fps").arg(format!("fps={}", fnum(v))));
            }
            Effect::Sepia => {
                self.graph.video.push(
                    FilterOp::new("colorchannelmixer")
                        .arg(".393:.769:.189:0:.349:.686:.168:0:.272:.534:.131"),
                );
            }
            Effect::Rlag => {
                let v = num(effect, raw)?;
                self.graph.video.push(FilterOp::new("random").arg(fnum(v)));
            }
            Effect::Hue => {
                let v = clamped(effect, raw, -180.0, 180.0)?;
                self.graph
                    .video
                    .push(FilterOp::new("hue").arg(format!("h={}", fnum(v))));
            }
            Effect::Deepfry => {
                let v = clamped(effect, raw, -100.0, 100.0)? / 10.0;
                self.graph
                    .video
                    .push(FilterOp::new("hue").arg(format!("s={}", fnum(v))));
            }
            Effect::Huesaturation => {
                let v = clamped(effect, raw, -180.0, 180.0)?;
                self.graph.video.push(
                    FilterOp::new("huesaturation")
                        .arg(fnum(v))
                        .arg("0.1")
                        .arg("0")
                        .arg("-100")
                        .arg("100"),
                );
                self.graph.video.push(FilterOp::new("format").arg("yuv420p"));
            }
            Effect::Zoom => {
                let z = fnum(clamped(effect, raw, 1.0, 10.0)?);
                // Upscale truncated to even dimensions, then crop back to the
                // source aspect so output size equals input size.
                self.graph.video.push(
                    FilterOp::new("scale")
                        .arg(format!("trunc(iw*{}/2)*2", z))
                        .arg(format!("trunc(ih*{}/2)*2", z)),
                );
                self.graph.video.push(
                    FilterOp::new("crop")
                        .arg(format!("iw/{}", z))
                        .arg(format!("ih/{}", z)),
                );
            }
            Effect::Sharpen => {
                let k = clamped(effect, raw, 1.0, 10.0)? as i64;
                self.graph.video.push(
                    FilterOp::new("unsharp")
                        .arg(format!("luma_msize_x={}", k))
                        .arg(format!("luma_msize_y={}", k))
                        .arg("luma_amount=1.5"),
                );
            }
            Effect::Shake => {
                let v = num(effect, raw)?;
                self.graph.video.push(
                    FilterOp::new("crop")
                        .arg("'iw/1.1:ih/1.1:(random(0)*2-1)*in_w:(random(0)*2-1)*in_h'"),
                );
                self.graph.video.push(
                    FilterOp::new("scale")
                        .arg(format!("iw*{}", fnum(v)))
                        .arg(format!("ih*{}", fnum(v))),
                );
                self.graph.video.push(FilterOp::new("setsar").arg("1").arg("1"));
            }
            Effect::Fisheye => {
                let times = clamped(effect, raw, 1.0, 2.0)? as usize;
                let report = self.prober.probe(self.input)?;
                let (w, h) = report.video_dimensions().ok_or_else(|| {
                    Error::ProbeFailed("no video stream geometry for fisheye".to_string())
                })?;
                for _ in 0..times {
                    self.graph
                        .video
                        .push(FilterOp::new("v360").arg("input=e").arg("output=ball"));
                    self.graph
                        .video
                        .push(FilterOp::new("scale").arg(w.to_string()).arg(h.to_string()));
                    self.graph.video.push(FilterOp::new("setsar").arg("1").arg("1"));
                }
            }
            Effect::Vbr => {
                self.graph.video_bitrate = bitrate(effect, raw)?;
            }
            Effect::Abr => {
                self.graph.audio_bitrate = bitrate(effect, raw)?;
            }
            Effect::Sfx => {
                let selector = clamped(effect, raw, 1.0, 100.0)? as u32;
                self.graph.overlay = Some(OverlayRequest { selector });
            }
            Effect::Watermark => {
                progress::print_warn("watermark is not implemented; skipping");
            }
        }
        Ok(())
    }

    fn eq_adjust(&mut self, key: &str, effect: Effect, raw: &str) -> Result<()> {
        let v = num(effect, raw)?;
        self.graph
            .video
            .push(FilterOp::new("eq").arg(format!("{}={}", key, fnum(v / 100.0))));
        Ok(())
    }
}

fn num(effect: Effect, raw: &str) -> Result<f64> {
    raw.trim().parse().map_err(|_| bad(effect, raw))
}

fn clamped(effect: Effect, raw: &str, min: f64, max: f64) -> Result<f64> {
    constrain(Some(raw), min, max).ok_or_else(|| bad(effect, raw))
}

fn bad(effect: Effect, raw: &str) -> Error {
    Error::BadParameter {
        effect: effect.name(),
        value: raw.to_string(),
    }
}

fn fnum(v: f64) -> String {
    format!("{}", v)
}

fn bitrate(effect: Effect, raw: &str) -> Result<u32> {
    let v = num(effect, raw)?;
    let inner = (100.0 - v).clamp(2.0, 100.0);
    Ok((100.0 + 2000.0 * inner) as u32)
}
