use ndarray::{Array3, ArrayView3, Zip};

use crate::element::MaskElement;
use crate::neighbors::{nearest_active, NearestActive};
use crate::segments::segment_bounds;

///
/// Deactivates every position whose active run is shorter than
/// `min_duration` frames. Returns the number of positions removed.
///
pub fn drop_short_segments(active: &mut Array3<bool>, min_duration: usize) -> usize {
    if min_duration <= 1 {
        return 0;
    }
    let bounds = segment_bounds(active.view());
    let mut removed = 0;
    Zip::from(active)
        .and(&bounds.length)
        .for_each(|a, &len| {
            if *a && (len as usize) < min_duration {
                *a = false;
                removed += 1;
            }
        });
    removed
}

///
/// Marks the inactive positions that lie in a bounded gap of at most
/// `max_gap_frames` frames
///
/// A gap touching either end of the track has no active frame on one side
/// and is never fillable.
///
pub fn fillable_gaps(active: ArrayView3<bool>, nearest: &NearestActive, max_gap_frames: usize) -> Array3<bool> {
    let frames = nearest.frames() as i64;
    let mut fill = Array3::from_elem(active.raw_dim(), false);
    if max_gap_frames == 0 {
        return fill;
    }
    Zip::from(&mut fill)
        .and(active)
        .and(&nearest.last)
        .and(&nearest.next)
        .for_each(|fill, &a, &last, &next| {
            let gap = next - last - 1;
            *fill = !a
                && last >= 0
                && next < frames
                && gap > 0
                && (gap as usize) <= max_gap_frames;
        });
    fill
}

///
/// Hold interpolation across short gaps
///
/// Active positions keep their value from `values`, fillable gap positions
/// copy the value of the preceding active frame of their track, everything
/// else becomes `T::zero()`. Returns the result and the number of filled
/// positions.
///
pub fn hold_fill<T: MaskElement>(
    values: ArrayView3<T>,
    active: ArrayView3<bool>,
    max_gap_frames: usize
) -> (Array3<T>, usize) {

    let nearest = nearest_active(active);
    let fill = fillable_gaps(active, &nearest, max_gap_frames);

    let mut filled = 0;
    let mut out = Array3::from_elem(values.raw_dim(), T::zero());
    Zip::indexed(&mut out)
        .and(active)
        .and(&fill)
        .and(&nearest.last)
        .for_each(|(b, t, f), out, &a, &fill, &last| {
            if a {
                *out = values[[b, t, f]];
            } else if fill {
                *out = values[[b, last as usize, f]];
                filled += 1;
            }
        });
    (out, filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(values: &[u8]) -> Array3<bool> {
        let active: Vec<bool> = values.iter().map(|&v| v != 0).collect();
        Array3::from_shape_vec((1, values.len(), 1), active).unwrap()
    }

    fn flat<A: Copy>(a: &Array3<A>) -> Vec<A> {
        a.iter().copied().collect()
    }

    #[test]
    fn short_segments_are_dropped() {
        let mut active = track(&[1, 0, 1, 1, 0, 1, 1, 1]);
        let removed = drop_short_segments(&mut active, 2);
        assert_eq!(removed, 1);
        assert_eq!(flat(&active), vec![false, false, true, true, false, true, true, true]);
    }

    #[test]
    fn min_duration_one_keeps_everything() {
        let mut active = track(&[1, 0, 1]);
        assert_eq!(drop_short_segments(&mut active, 1), 0);
        assert_eq!(flat(&active), vec![true, false, true]);
    }

    #[test]
    fn only_bounded_gaps_are_fillable() {
        let active = track(&[0, 1, 0, 0, 1, 0, 0]);
        let nearest = nearest_active(active.view());
        let fill = fillable_gaps(active.view(), &nearest, 5);
        assert_eq!(flat(&fill), vec![false, false, true, true, false, false, false]);
    }

    #[test]
    fn gaps_longer_than_max_are_kept() {
        let active = track(&[1, 0, 0, 0, 1]);
        let nearest = nearest_active(active.view());
        assert!(flat(&fillable_gaps(active.view(), &nearest, 2)).iter().all(|f| !f));
        assert_eq!(flat(&fillable_gaps(active.view(), &nearest, 3)).iter().filter(|&&f| f).count(), 3);
    }

    #[test]
    fn hold_copies_preceding_value() {
        let values = Array3::from_shape_vec((1, 5, 1), vec![0.25f32, 0.0, 0.0, 0.75, -1.0]).unwrap();
        let active = values.mapv(|v| v > 0.0);
        let (out, filled) = hold_fill(values.view(), active.view(), 2);
        assert_eq!(filled, 2);
        assert_eq!(flat(&out), vec![0.25, 0.25, 0.25, 0.75, 0.0]);
    }
}
