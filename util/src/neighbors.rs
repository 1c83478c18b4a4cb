use ndarray::{Array2, Array3, ArrayView3, Axis, Zip};

///
/// Nearest active frame at or around every position of a track
///
/// `last[t]` is the latest active frame `<= t` (or -1), `next[t]` the earliest
/// active frame `>= t` (or `T`). Unlike `SegmentBounds` these are defined at
/// inactive positions too, which is what gap geometry is measured with.
///
#[derive(Debug, Clone)]
pub struct NearestActive {
    pub last: Array3<i64>,
    pub next: Array3<i64>,
}

impl NearestActive {

    /// Number of frames of the tracks this was computed for
    pub fn frames(&self) -> usize {
        self.last.len_of(Axis(1))
    }
}

///
/// Scans a `(B, T, F)` activation forwards and backwards carrying the most
/// recently seen active frame. The carried index only changes when a new
/// active frame is observed.
///
pub fn nearest_active(active: ArrayView3<bool>) -> NearestActive {
    let (batch, frames, features) = active.dim();

    let mut last = Array3::from_elem((batch, frames, features), -1i64);
    let mut seen = Array2::from_elem((batch, features), -1i64);
    for t in 0..frames {
        Zip::from(&mut seen)
            .and(last.index_axis_mut(Axis(1), t))
            .and(active.index_axis(Axis(1), t))
            .for_each(|seen, out, &a| {
                if a {
                    *seen = t as i64;
                }
                *out = *seen;
            });
    }

    let none = frames as i64;
    let mut next = Array3::from_elem((batch, frames, features), none);
    seen.fill(none);
    for t in (0..frames).rev() {
        Zip::from(&mut seen)
            .and(next.index_axis_mut(Axis(1), t))
            .and(active.index_axis(Axis(1), t))
            .for_each(|seen, out, &a| {
                if a {
                    *seen = t as i64;
                }
                *out = *seen;
            });
    }

    NearestActive { last, next }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(values: &[u8]) -> Array3<bool> {
        let active: Vec<bool> = values.iter().map(|&v| v != 0).collect();
        Array3::from_shape_vec((1, values.len(), 1), active).unwrap()
    }

    #[test]
    fn carries_across_inactive_frames() {
        let nearest = nearest_active(track(&[0, 1, 0, 0, 1, 0]).view());
        assert_eq!(nearest.last.iter().copied().collect::<Vec<_>>(), vec![-1, 1, 1, 1, 4, 4]);
        assert_eq!(nearest.next.iter().copied().collect::<Vec<_>>(), vec![1, 1, 4, 4, 4, 6]);
        assert_eq!(nearest.frames(), 6);
    }

    #[test]
    fn all_inactive_track_uses_sentinels() {
        let nearest = nearest_active(track(&[0, 0, 0]).view());
        assert!(nearest.last.iter().all(|&i| i == -1));
        assert!(nearest.next.iter().all(|&i| i == 3));
    }

    #[test]
    fn active_positions_point_at_themselves() {
        let nearest = nearest_active(track(&[1, 1, 0, 1]).view());
        for &t in &[0usize, 1, 3] {
            assert_eq!(nearest.last[[0, t, 0]], t as i64);
            assert_eq!(nearest.next[[0, t, 0]], t as i64);
        }
    }
}
