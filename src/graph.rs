//! Filter graph data model: primitive operations, per-stream chains, and the
//! compiled graph handed to the engine.

use std::fmt;

pub const DEFAULT_VIDEO_BITRATE: u32 = 1_500_000;
pub const DEFAULT_AUDIO_BITRATE: u32 = 64_000;

/// One primitive transform, e.g. `boxblur=4:1` or bare `hflip`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOp {
    pub operator: &'static str,
    pub args: Vec<String>,
}

impl FilterOp {
    pub fn new(operator: &'static str) -> FilterOp {
        FilterOp {
            operator,
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> FilterOp {
        self.args.push(arg.into());
        self
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}", self.operator)
        } else {
            write!(f, "{}={}", self.operator, self.args.join(":"))
        }
    }
}

/// Ordered sequence of operations for one stream. Append-only: directive
/// order encodes effect order, and repeated operations compound instead of
/// replacing earlier ones.
#[derive(Debug, Default, Clone)]
pub struct FilterChain {
    ops: Vec<FilterOp>,
}

impl FilterChain {
    pub fn push(&mut self, op: FilterOp) {
        self.ops.push(op);
    }

    pub fn ops(&self) -> &[FilterOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl fmt::Display for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.ops.iter().map(|op| op.to_string()).collect();
        write!(f, "{}", rendered.join(","))
    }
}

/// Armed by an `sfx` directive; consumed by the overlay pass after the
/// primary render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayRequest {
    pub selector: u32,
}

/// Everything the Render & Overlay Driver needs for one run.
#[derive(Debug, Clone)]
pub struct FilterGraph {
    pub video: FilterChain,
    pub audio: FilterChain,
    pub video_bitrate: u32,
    pub audio_bitrate: u32,
    pub overlay: Option<OverlayRequest>,
}

impl Default for FilterGraph {
    fn default() -> FilterGraph {
        FilterGraph {
            video: FilterChain::default(),
            audio: FilterChain::default(),
            video_bitrate: DEFAULT_VIDEO_BITRATE,
            audio_bitrate: DEFAULT_AUDIO_BITRATE,
            overlay: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_op_renders_without_equals() {
        assert_eq!(FilterOp::new("hflip").to_string(), "hflip");
    }

    #[test]
    fn args_join_with_colon() {
        let op = FilterOp::new("boxblur").arg("4").arg("1");
        assert_eq!(op.to_string(), "boxblur=4:1");
    }

    #[test]
    fn chain_joins_with_comma_in_order() {
        let mut chain = FilterChain::default();
        chain.push(FilterOp::new("hflip"));
        chain.push(FilterOp::new("eq").arg("contrast=0.5"));
        assert_eq!(chain.to_string(), "hflip,eq=contrast=0.5");
    }

    #[test]
    fn graph_defaults() {
        let graph = FilterGraph::default();
        assert_eq!(graph.video_bitrate, 1_500_000);
        assert_eq!(graph.audio_bitrate, 64_000);
        assert!(graph.overlay.is_none());
        assert!(graph.video.is_empty() && graph.audio.is_empty());
    }
}
