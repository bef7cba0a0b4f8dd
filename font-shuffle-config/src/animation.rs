//! Animated parameter tracks.
//!
//! Every numeric effect parameter (change interval, random seed, font size,
//! letter spacing, render box dimensions) is an [`AnimatedParam`]: a clamped
//! keyframe track sampled at a frame position. A track with no keyframes is
//! a constant, which is the common case.
//!
//! Sampling is a pure function of `(frame, length, fps)` — the render path
//! may query frames in any order (scrubbing) and must get identical values
//! on every visit.

use serde::{Deserialize, Serialize};

/// A single keyframe: a value pinned to a frame position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub frame: i64,
    pub value: f64,
}

/// A keyframed scalar parameter with range clamping.
///
/// Values between keyframes are linearly interpolated; before the first and
/// after the last keyframe the track extends as a constant. Sampled values
/// are always clamped into `[min, max]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimatedParam {
    default_value: f64,
    min: f64,
    max: f64,
    #[serde(default)]
    keyframes: Vec<Keyframe>,
}

impl AnimatedParam {
    /// Create a constant parameter.
    pub fn new(default_value: f64, min: f64, max: f64) -> Self {
        AnimatedParam {
            default_value: default_value.clamp(min, max),
            min,
            max,
            keyframes: Vec::new(),
        }
    }

    /// Replace the keyframe track. Keyframes are sorted by frame position;
    /// duplicates on the same frame keep their relative order (last wins on
    /// exact sampling).
    pub fn with_keyframes(mut self, mut keyframes: Vec<Keyframe>) -> Self {
        keyframes.sort_by_key(|k| k.frame);
        self.keyframes = keyframes;
        self
    }

    /// The constant value used when no keyframes are set.
    pub fn default_value(&self) -> f64 {
        self.default_value
    }

    /// Allowed value range.
    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Sample the track at `frame`.
    ///
    /// `length` and `fps` describe the timeline the track is evaluated
    /// against; they are accepted for host-contract parity even though the
    /// linear track itself only needs the frame position.
    pub fn sample(&self, frame: i64, _length: i64, _fps: f64) -> f64 {
        let raw = match self.keyframes.as_slice() {
            [] => self.default_value,
            [only] => only.value,
            keys => Self::interpolate(keys, frame),
        };
        raw.clamp(self.min, self.max)
    }

    fn interpolate(keys: &[Keyframe], frame: i64) -> f64 {
        let first = keys[0];
        let last = keys[keys.len() - 1];
        if frame <= first.frame {
            return first.value;
        }
        if frame >= last.frame {
            return last.value;
        }
        // partition_point: index of the first keyframe past `frame`
        let idx = keys.partition_point(|k| k.frame <= frame);
        let a = keys[idx - 1];
        let b = keys[idx];
        if b.frame == a.frame {
            return b.value;
        }
        let t = (frame - a.frame) as f64 / (b.frame - a.frame) as f64;
        a.value + (b.value - a.value) * t
    }
}
