use crate::models::Segment;

/// Suppress bucket changes that come sooner than `min_hold` seconds after
/// the last accepted change.
///
/// A rejected change leaves the segment on the current bucket. The first
/// segment's start counts as the initial change.
pub fn enforce_min_hold(segments: &[Segment], min_hold: f64) -> Vec<Segment> {
    let Some(first) = segments.first() else {
        return Vec::new();
    };

    let mut current = first.bucket;
    let mut last_change = first.t0;

    segments
        .iter()
        .map(|segment| {
            if segment.bucket != current && segment.t0 - last_change >= min_hold {
                current = segment.bucket;
                last_change = segment.t0;
            }
            Segment {
                bucket: current,
                ..segment.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Bucket;

    #[test]
    fn test_fast_flip_is_held() {
        let segments = vec![
            Segment::new(0.0, 0.5, Bucket::A, "Hello"),
            Segment::new(0.6, 1.0, Bucket::B, "Hi"),
            Segment::new(1.1, 1.5, Bucket::A, "How are you"),
        ];

        let held = enforce_min_hold(&segments, 1.2);
        assert!(held.iter().all(|s| s.bucket == Bucket::A));
    }

    #[test]
    fn test_change_at_exactly_min_hold_is_accepted() {
        let segments = vec![
            Segment::new(0.0, 1.0, Bucket::A, "a"),
            Segment::new(1.2, 2.0, Bucket::B, "b"),
        ];
        let held = enforce_min_hold(&segments, 1.2);
        assert_eq!(held[1].bucket, Bucket::B);

        let segments = vec![
            Segment::new(1.0, 2.0, Bucket::A, "a"),
            Segment::new(2.25, 2.75, Bucket::B, "b"),
            Segment::new(3.0, 3.25, Bucket::A, "c"),
            Segment::new(3.5, 4.0, Bucket::A, "d"),
        ];
        let held = enforce_min_hold(&segments, 1.25);
        let buckets: Vec<_> = held.iter().map(|s| s.bucket).collect();
        assert_eq!(buckets, vec![Bucket::A, Bucket::B, Bucket::B, Bucket::A]);
    }

    #[test]
    fn test_hold_restarts_after_accepted_change() {
        let segments = vec![
            Segment::new(0.0, 1.0, Bucket::A, "a"),
            Segment::new(1.5, 1.9, Bucket::B, "b"),
            Segment::new(2.0, 2.5, Bucket::A, "c"),
            Segment::new(2.8, 3.5, Bucket::A, "d"),
        ];

        let held = enforce_min_hold(&segments, 1.2);
        let buckets: Vec<_> = held.iter().map(|s| s.bucket).collect();
        // 1.5s after start: accepted. 0.5s after that: held. 1.3s after: accepted.
        assert_eq!(buckets, vec![Bucket::A, Bucket::B, Bucket::B, Bucket::A]);
    }
}
