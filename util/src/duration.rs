use ndarray::{Array2, Array3, ArrayView3, Axis, Zip};

///
/// Total length of the active run at every position of a `(B, T, F)`
/// activation (0 at inactive positions)
///
/// Computed from two monotone run counters: the forward counter counts the
/// active frames up to and including `t`, the backward counter the active
/// frames from `t` on. Position `t` is counted by both. Tracks advance in
/// parallel at every step.
///
pub fn run_lengths(active: ArrayView3<bool>) -> Array3<u32> {
    let (batch, frames, features) = active.dim();
    let mut lengths = Array3::zeros((batch, frames, features));
    let mut running = Array2::<u32>::zeros((batch, features));

    for t in 0..frames {
        Zip::from(&mut running)
            .and(lengths.index_axis_mut(Axis(1), t))
            .and(active.index_axis(Axis(1), t))
            .par_for_each(|run, len, &a| {
                *run = if a { *run + 1 } else { 0 };
                *len = *run;
            });
    }

    running.fill(0);
    for t in (0..frames).rev() {
        Zip::from(&mut running)
            .and(lengths.index_axis_mut(Axis(1), t))
            .and(active.index_axis(Axis(1), t))
            .par_for_each(|run, len, &a| {
                *run = if a { *run + 1 } else { 0 };
                if a {
                    *len += *run - 1;
                }
            });
    }

    lengths
}

///
/// Keeps only positions whose active run spans at least `min_duration`
/// frames. Returns the pruned activation and the number of positions removed.
///
pub fn prune_duration(active: ArrayView3<bool>, min_duration: usize) -> (Array3<bool>, usize) {
    if min_duration <= 1 {
        return (active.to_owned(), 0);
    }
    let lengths = run_lengths(active);
    let mut removed = 0;
    let mut kept = Array3::from_elem(active.raw_dim(), false);
    Zip::from(&mut kept)
        .and(active)
        .and(&lengths)
        .for_each(|k, &a, &len| {
            *k = a && len as usize >= min_duration;
            if a && !*k {
                removed += 1;
            }
        });
    (kept, removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segments::segment_bounds;

    fn track(values: &[u8]) -> Array3<bool> {
        let active: Vec<bool> = values.iter().map(|&v| v != 0).collect();
        Array3::from_shape_vec((1, values.len(), 1), active).unwrap()
    }

    #[test]
    fn counters_sum_to_run_length() {
        let lengths = run_lengths(track(&[1, 1, 1, 0, 1, 0, 1, 1]).view());
        assert_eq!(lengths.iter().copied().collect::<Vec<_>>(), vec![3, 3, 3, 0, 1, 0, 2, 2]);
    }

    #[test]
    fn agrees_with_segment_bounds() {
        // Every 6-frame pattern
        for bits in 0u32..64 {
            let values: Vec<u8> = (0..6).map(|i| ((bits >> i) & 1) as u8).collect();
            let active = track(&values);
            let lengths = run_lengths(active.view());
            let bounds = segment_bounds(active.view());
            for (len, expected) in lengths.iter().zip(bounds.length.iter()) {
                assert_eq!(*len as i64, *expected, "pattern {:?}", values);
            }
        }
    }

    #[test]
    fn threshold_boundary() {
        let active = track(&[0, 1, 1, 1, 0, 1, 1, 0]);
        let (kept, removed) = prune_duration(active.view(), 3);
        assert_eq!(removed, 2);
        assert_eq!(kept.iter().copied().collect::<Vec<_>>(),
            vec![false, true, true, true, false, false, false, false]);
    }

    #[test]
    fn min_duration_one_is_identity() {
        let active = track(&[1, 0, 1]);
        let (kept, removed) = prune_duration(active.view(), 1);
        assert_eq!(kept, active);
        assert_eq!(removed, 0);
    }
}
