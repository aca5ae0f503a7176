use crate::models::{Bucket, ByBucket, Segment};

/// Relabel each segment with the plurality bucket of its neighbourhood
///
/// The neighbourhood of a segment is every segment whose start lies within
/// half a window of its own start, itself included. Ties go to bucket A.
/// Input must be ordered by `t0`.
pub fn majority_vote(segments: &[Segment], window: f64) -> Vec<Segment> {
    let half = window / 2.0;
    let mut lo = 0;
    let mut hi = 0;

    segments
        .iter()
        .map(|segment| {
            // Both window edges only move forward as t0 increases
            while lo < segments.len() && segments[lo].t0 < segment.t0 - half {
                lo += 1;
            }
            while hi < segments.len() && segments[hi].t0 <= segment.t0 + half {
                hi += 1;
            }

            let mut counts = ByBucket::new(0usize, 0usize);
            for neighbour in &segments[lo..hi] {
                counts[neighbour.bucket] += 1;
            }

            let bucket = if counts.a >= counts.b {
                Bucket::A
            } else {
                Bucket::B
            };

            Segment {
                bucket,
                ..segment.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buckets(segments: &[Segment]) -> Vec<Bucket> {
        segments.iter().map(|s| s.bucket).collect()
    }

    #[test]
    fn test_isolated_flip_is_outvoted() {
        let segments = vec![
            Segment::new(0.0, 0.2, Bucket::A, "so"),
            Segment::new(0.2, 0.3, Bucket::B, "yeah"),
            Segment::new(0.4, 0.6, Bucket::A, "then"),
        ];

        let voted = majority_vote(&segments, 1.0);
        assert_eq!(buckets(&voted), vec![Bucket::A, Bucket::A, Bucket::A]);
    }

    #[test]
    fn test_tie_favours_a() {
        let segments = vec![
            Segment::new(0.0, 0.2, Bucket::B, "one"),
            Segment::new(0.3, 0.5, Bucket::A, "two"),
        ];

        let voted = majority_vote(&segments, 1.0);
        assert_eq!(buckets(&voted), vec![Bucket::A, Bucket::A]);
    }

    #[test]
    fn test_distant_segments_keep_their_bucket() {
        let segments = vec![
            Segment::new(0.0, 1.0, Bucket::A, "hello"),
            Segment::new(1.0, 2.0, Bucket::B, "hi"),
            Segment::new(5.0, 6.0, Bucket::B, "well"),
        ];

        let voted = majority_vote(&segments, 1.0);
        assert_eq!(buckets(&voted), vec![Bucket::A, Bucket::B, Bucket::B]);
        assert_eq!(voted[1].text, "hi");
    }

    #[test]
    fn test_window_edges_are_inclusive() {
        // the middle segment sees both neighbours at exactly half a window
        let segments = vec![
            Segment::new(0.0, 0.5, Bucket::B, "one"),
            Segment::new(0.5, 1.0, Bucket::A, "two"),
            Segment::new(1.0, 1.5, Bucket::B, "three"),
        ];

        let voted = majority_vote(&segments, 1.0);
        assert_eq!(buckets(&voted), vec![Bucket::A, Bucket::B, Bucket::A]);
    }

    #[test]
    fn test_empty() {
        assert!(majority_vote(&[], 1.0).is_empty());
    }
}
