use crate::models::Segment;

/// Fold segments shorter than `min_segment` seconds into a neighbour
///
/// A crumb goes to whichever neighbour is temporally closer, the preceding
/// one on a tie. With a single neighbour it goes there; a lone crumb is kept.
/// The crumb's bucket is discarded in favour of the neighbour's.
pub fn absorb_crumbs(segments: &[Segment], min_segment: f64) -> Vec<Segment> {
    if segments.len() <= 1 {
        return segments.to_vec();
    }

    let mut result: Vec<Segment> = Vec::with_capacity(segments.len());
    let mut pending = segments.iter().cloned().peekable();

    while let Some(segment) = pending.next() {
        if segment.duration() >= min_segment {
            result.push(segment);
            continue;
        }

        let to_prev = result.last().map(|prev| segment.t0 - prev.t1);
        let to_next = pending.peek().map(|next| next.t0 - segment.t1);

        let absorb_backward = match (to_prev, to_next) {
            (Some(prev), Some(next)) => prev <= next,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => {
                result.push(segment);
                continue;
            }
        };

        if absorb_backward {
            if let Some(prev) = result.last_mut() {
                prev.absorb_after(&segment);
            }
        } else if let Some(next) = pending.peek_mut() {
            next.absorb_before(&segment);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Bucket;

    #[test]
    fn test_tie_goes_to_previous() {
        let segments = vec![
            Segment::new(0.0, 1.0, Bucket::A, "hello"),
            Segment::new(1.25, 1.5, Bucket::B, "uh"),
            Segment::new(1.75, 3.0, Bucket::B, "there"),
        ];

        let result = absorb_crumbs(&segments, 0.3);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].text, "hello uh");
        assert_eq!(result[0].t1, 1.5);
        assert_eq!(result[0].bucket, Bucket::A);
        assert_eq!(result[1].text, "there");
    }

    #[test]
    fn test_closer_next_neighbour_wins() {
        let segments = vec![
            Segment::new(0.0, 1.0, Bucket::A, "a"),
            Segment::new(1.5, 1.6, Bucket::B, "b"),
            Segment::new(1.65, 3.0, Bucket::A, "c"),
        ];

        let result = absorb_crumbs(&segments, 0.3);
        assert_eq!(result.len(), 2);
        assert_eq!(result[1].text, "b c");
        assert_eq!(result[1].t0, 1.5);
        assert_eq!(result[1].bucket, Bucket::A);
    }

    #[test]
    fn test_leading_crumb_prepends_to_next() {
        let segments = vec![
            Segment::new(0.0, 0.1, Bucket::B, "uh"),
            Segment::new(0.5, 2.0, Bucket::A, "hello"),
        ];

        let result = absorb_crumbs(&segments, 0.3);
        assert_eq!(result, vec![Segment::new(0.0, 2.0, Bucket::A, "uh hello")]);
    }

    #[test]
    fn test_trailing_crumb_appends_to_previous() {
        let segments = vec![
            Segment::new(0.0, 2.0, Bucket::A, "see you"),
            Segment::new(2.5, 2.6, Bucket::B, "bye"),
        ];

        let result = absorb_crumbs(&segments, 0.3);
        assert_eq!(result, vec![Segment::new(0.0, 2.6, Bucket::A, "see you bye")]);
    }

    #[test]
    fn test_lone_crumb_kept() {
        let segments = vec![Segment::new(0.0, 0.1, Bucket::B, "hm")];
        assert_eq!(absorb_crumbs(&segments, 0.3), segments);
    }
}
