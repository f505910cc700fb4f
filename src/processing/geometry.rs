use crate::models::BoundingBox;
use std::cmp::Reverse;

pub const DEFAULT_OVERLAP_THRESHOLD: f64 = 0.4;

/// Reduces mutually overlapping boxes to one representative each.
///
/// Boxes are visited largest first and a box is kept only if its overlap
/// ratio with every box already kept is below `threshold`. Equal areas keep
/// their input order. Confidence plays no part.
pub fn dedup_boxes(boxes: &[BoundingBox], threshold: f64) -> Vec<BoundingBox> {
    dedup_indices(boxes, threshold)
        .into_iter()
        .map(|i| boxes[i])
        .collect()
}

/// Same selection as [`dedup_boxes`], returned as indices into `boxes`.
pub fn dedup_indices(boxes: &[BoundingBox], threshold: f64) -> Vec<usize> {
    let mut ordered: Vec<usize> = (0..boxes.len()).collect();
    ordered.sort_by_key(|&i| Reverse(boxes[i].area()));

    let mut kept: Vec<usize> = Vec::with_capacity(ordered.len());
    for candidate in ordered {
        if kept
            .iter()
            .all(|&k| boxes[candidate].overlap_ratio(&boxes[k]) < threshold)
        {
            kept.push(candidate);
        }
    }
    log::debug!("Deduplicated {} boxes down to {}", boxes.len(), kept.len());
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<BoundingBox> {
        vec![
            BoundingBox::new(10, 10, 50, 30),
            BoundingBox::new(0, 0, 100, 40),
            BoundingBox::new(5, 5, 95, 38),
            BoundingBox::new(200, 0, 260, 40),
            BoundingBox::new(210, 5, 250, 35),
            BoundingBox::new(400, 400, 400, 400),
        ]
    }

    #[test]
    fn empty_input() {
        assert!(dedup_boxes(&[], DEFAULT_OVERLAP_THRESHOLD).is_empty());
    }

    #[test]
    fn larger_box_wins() {
        let kept = dedup_boxes(&sample(), DEFAULT_OVERLAP_THRESHOLD);
        assert_eq!(kept[0], BoundingBox::new(0, 0, 100, 40));
        assert!(!kept.contains(&BoundingBox::new(5, 5, 95, 38)));
        assert!(kept.contains(&BoundingBox::new(200, 0, 260, 40)));
        // 40x30 inside 60x40 is exactly 0.5 overlap
        assert!(!kept.contains(&BoundingBox::new(210, 5, 250, 35)));
    }

    #[test]
    fn small_fragment_inside_large_box_survives_low_overlap() {
        // 800 / 4000 = 0.2
        let kept = dedup_boxes(&sample(), DEFAULT_OVERLAP_THRESHOLD);
        assert!(kept.contains(&BoundingBox::new(10, 10, 50, 30)));
    }

    #[test]
    fn zero_area_box_is_kept() {
        let kept = dedup_boxes(&sample(), DEFAULT_OVERLAP_THRESHOLD);
        assert!(kept.contains(&BoundingBox::new(400, 400, 400, 400)));
    }

    #[test]
    fn equal_areas_keep_input_order() {
        let a = BoundingBox::new(0, 0, 10, 10);
        let b = BoundingBox::new(100, 0, 110, 10);
        assert_eq!(dedup_boxes(&[a, b], 0.4), vec![a, b]);
        assert_eq!(dedup_boxes(&[b, a], 0.4), vec![b, a]);
    }

    #[test]
    fn identical_boxes_collapse() {
        let a = BoundingBox::new(0, 0, 10, 10);
        assert_eq!(dedup_boxes(&[a, a, a], 0.4), vec![a]);
    }

    #[test]
    fn indices_point_at_kept_boxes() {
        let boxes = sample();
        assert_eq!(dedup_indices(&boxes, DEFAULT_OVERLAP_THRESHOLD)[0], 1);
        let a = BoundingBox::new(0, 0, 10, 10);
        assert_eq!(dedup_indices(&[a, a], 0.4), vec![0]);
    }

    #[test]
    fn output_is_idempotent() {
        let once = dedup_boxes(&sample(), DEFAULT_OVERLAP_THRESHOLD);
        let twice = dedup_boxes(&once, DEFAULT_OVERLAP_THRESHOLD);
        assert_eq!(once, twice);
    }

    #[test]
    fn kept_pairs_stay_under_threshold() {
        let kept = dedup_boxes(&sample(), DEFAULT_OVERLAP_THRESHOLD);
        for (i, a) in kept.iter().enumerate() {
            for b in kept.iter().skip(i + 1) {
                assert!(a.overlap_ratio(b) < DEFAULT_OVERLAP_THRESHOLD);
            }
        }
    }
}
