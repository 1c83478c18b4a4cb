use ndarray::{Array2, Array3, ArrayView3, Axis, Zip};

use crate::options::FusionMode;

///
/// Number of active frames in the window `[t - radius, t + radius]` of every
/// position
///
/// Frames outside the track count as inactive, as if the time axis were
/// zero-padded by `radius` frames on each side. Windows are evaluated from a
/// running prefix count, so the cost does not depend on `radius`.
///
pub fn window_counts(active: ArrayView3<bool>, radius: usize) -> Array3<u32> {
    let (batch, frames, features) = active.dim();

    // prefix[t] = active frames in [0, t)
    let mut prefix = Array3::<u32>::zeros((batch, frames + 1, features));
    let mut running = Array2::<u32>::zeros((batch, features));
    for t in 0..frames {
        Zip::from(&mut running)
            .and(active.index_axis(Axis(1), t))
            .for_each(|run, &a| *run += a as u32);
        prefix.index_axis_mut(Axis(1), t + 1).assign(&running);
    }

    let mut counts = Array3::zeros((batch, frames, features));
    for t in 0..frames {
        let lo = t.saturating_sub(radius);
        let hi = t.saturating_add(radius).saturating_add(1).min(frames);
        Zip::from(counts.index_axis_mut(Axis(1), t))
            .and(prefix.index_axis(Axis(1), hi))
            .and(prefix.index_axis(Axis(1), lo))
            .par_for_each(|c, &upper, &lower| *c = upper - lower);
    }
    counts
}

///
/// Nominal window size `2 * radius + 1`, padding included
///
pub fn window_size(radius: usize) -> usize {
    radius.saturating_mul(2).saturating_add(1)
}

///
/// Votes required in majority mode: `threshold` clamped to `[1, window_size]`
///
pub fn effective_threshold(threshold: usize, radius: usize) -> usize {
    threshold.clamp(1, window_size(radius))
}

///
/// The temporal 'dilation' operator: active where any frame of the window is
/// active
///
pub fn window_or(active: ArrayView3<bool>, radius: usize) -> Array3<bool> {
    if radius == 0 {
        return active.to_owned();
    }
    window_counts(active, radius).mapv(|c| c > 0)
}

///
/// Majority vote over the window. Padding frames count toward the window
/// size but never toward the vote, which biases the first and last `radius`
/// frames toward inactivity.
///
pub fn window_majority(active: ArrayView3<bool>, radius: usize, threshold: usize) -> Array3<bool> {
    let needed = effective_threshold(threshold, radius) as u64;
    window_counts(active, radius).mapv(|c| c as u64 >= needed)
}

///
/// Sliding-window fusion along the time axis
///
pub fn fuse(active: ArrayView3<bool>, radius: usize, mode: FusionMode, threshold: usize) -> Array3<bool> {
    match mode {
        FusionMode::Or => window_or(active, radius),
        FusionMode::Majority => window_majority(active, radius, threshold),
    }
}
