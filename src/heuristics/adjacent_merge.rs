use crate::models::Segment;

/// Concatenate consecutive same-bucket segments separated by at most `max_gap` seconds
pub fn merge_adjacent(segments: &[Segment], max_gap: f64) -> Vec<Segment> {
    let mut merged: Vec<Segment> = Vec::with_capacity(segments.len());

    for segment in segments {
        match merged.last_mut() {
            Some(current)
                if current.bucket == segment.bucket && segment.t0 - current.t1 <= max_gap =>
            {
                current.absorb_after(segment);
            }
            _ => merged.push(segment.clone()),
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Bucket;

    #[test]
    fn test_merge_small_gap() {
        let segments = vec![
            Segment::new(0.0, 1.0, Bucket::A, "Hello"),
            Segment::new(1.1, 2.0, Bucket::A, "there"),
            Segment::new(2.5, 3.0, Bucket::B, "Hi"),
        ];

        let merged = merge_adjacent(&segments, 0.35);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].text, "Hello there");
        assert_eq!(merged[0].t0, 0.0);
        assert_eq!(merged[0].t1, 2.0);
        assert_eq!(merged[1].bucket, Bucket::B);
    }

    #[test]
    fn test_large_gap_not_merged() {
        let segments = vec![
            Segment::new(0.0, 1.0, Bucket::A, "Hello"),
            Segment::new(1.5, 2.0, Bucket::A, "again"),
        ];

        assert_eq!(merge_adjacent(&segments, 0.35).len(), 2);
    }

    #[test]
    fn test_different_bucket_not_merged() {
        let segments = vec![
            Segment::new(0.0, 1.0, Bucket::A, "Hello"),
            Segment::new(1.0, 2.0, Bucket::B, "Hi"),
        ];

        assert_eq!(merge_adjacent(&segments, 0.35).len(), 2);
    }
}
