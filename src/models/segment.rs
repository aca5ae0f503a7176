use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Anonymous acoustic cluster label from upstream diarization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bucket {
    A,
    B,
}

impl Bucket {
    pub const ALL: [Bucket; 2] = [Bucket::A, Bucket::B];

    /// The other bucket of the pair
    pub fn other(self) -> Self {
        match self {
            Bucket::A => Bucket::B,
            Bucket::B => Bucket::A,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bucket::A => write!(f, "A"),
            Bucket::B => write!(f, "B"),
        }
    }
}

/// One value per bucket
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ByBucket<T> {
    #[serde(rename = "A")]
    pub a: T,
    #[serde(rename = "B")]
    pub b: T,
}

impl<T> ByBucket<T> {
    pub fn new(a: T, b: T) -> Self {
        Self { a, b }
    }

    pub fn map<U>(&self, mut f: impl FnMut(Bucket, &T) -> U) -> ByBucket<U> {
        ByBucket {
            a: f(Bucket::A, &self.a),
            b: f(Bucket::B, &self.b),
        }
    }
}

impl<T> Index<Bucket> for ByBucket<T> {
    type Output = T;

    fn index(&self, bucket: Bucket) -> &T {
        match bucket {
            Bucket::A => &self.a,
            Bucket::B => &self.b,
        }
    }
}

impl<T> IndexMut<Bucket> for ByBucket<T> {
    fn index_mut(&mut self, bucket: Bucket) -> &mut T {
        match bucket {
            Bucket::A => &mut self.a,
            Bucket::B => &mut self.b,
        }
    }
}

/// A timed span of speech attributed to one bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start time in seconds
    pub t0: f64,
    /// End time in seconds
    pub t1: f64,
    pub bucket: Bucket,
    pub text: String,
}

/// Segment as delivered by the diarizer
pub type RawSegment = Segment;

/// Segment after temporal smoothing
pub type SmoothedSegment = Segment;

impl Segment {
    pub fn new(t0: f64, t1: f64, bucket: Bucket, text: impl Into<String>) -> Self {
        Self {
            t0,
            t1,
            bucket,
            text: text.into(),
        }
    }

    /// Duration of this segment in seconds
    pub fn duration(&self) -> f64 {
        (self.t1 - self.t0).max(0.0)
    }

    /// Extend this segment to cover a later one, appending its text
    pub fn absorb_after(&mut self, later: &Segment) {
        self.t1 = self.t1.max(later.t1);
        push_text(&mut self.text, &later.text);
    }

    /// Extend this segment to cover an earlier one, prepending its text
    pub fn absorb_before(&mut self, earlier: &Segment) {
        self.t0 = self.t0.min(earlier.t0);
        let mut text = earlier.text.clone();
        push_text(&mut text, &self.text);
        self.text = text;
    }
}

fn push_text(dst: &mut String, src: &str) {
    if src.is_empty() {
        return;
    }
    if !dst.is_empty() {
        dst.push(' ');
    }
    dst.push_str(src);
}

/// Number of bucket changes between chronologically adjacent segments
pub fn count_flips(segments: &[Segment]) -> usize {
    segments
        .windows(2)
        .filter(|pair| pair[0].bucket != pair[1].bucket)
        .count()
}
