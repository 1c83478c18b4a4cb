use ndarray::{Array2, Array3, ArrayView3, Axis, Zip};

///
/// A maximal run of consecutive active frames within a track, with
/// inclusive `start` and `end` frame indices
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
}

impl Segment {
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

///
/// Lists the active runs of a single track in frame order
///
pub fn segments(track: &[bool]) -> Vec<Segment> {
    let mut runs = Vec::new();
    let mut start = None;
    for (t, &active) in track.iter().enumerate() {
        match (active, start) {
            (true, None) => start = Some(t),
            (false, Some(s)) => {
                runs.push(Segment { start: s, end: t - 1 });
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push(Segment { start: s, end: track.len() - 1 });
    }
    runs
}

///
/// Per-position bounds of the active run each position belongs to
///
/// Arrays share the `(B, T, F)` shape of the input. At inactive positions
/// `length` is 0 and `start`/`end` are -1.
///
#[derive(Debug, Clone)]
pub struct SegmentBounds {
    pub length: Array3<i64>,
    pub start: Array3<i64>,
    pub end: Array3<i64>,
}

///
/// Computes segment bounds for every track of a `(B, T, F)` activation
///
/// A forward scan carries the start of the current run and a backward scan
/// the end of it. Each step updates the carried state of all tracks at once.
///
pub fn segment_bounds(active: ArrayView3<bool>) -> SegmentBounds {
    let (batch, frames, features) = active.dim();

    let mut start = Array3::from_elem((batch, frames, features), -1i64);
    let mut current = Array2::from_elem((batch, features), -1i64);
    for t in 0..frames {
        Zip::from(&mut current)
            .and(start.index_axis_mut(Axis(1), t))
            .and(active.index_axis(Axis(1), t))
            .for_each(|cur, out, &a| {
                if !a {
                    *cur = -1;
                } else if *cur < 0 {
                    *cur = t as i64;
                }
                *out = *cur;
            });
    }

    let mut end = Array3::from_elem((batch, frames, features), -1i64);
    current.fill(-1);
    for t in (0..frames).rev() {
        Zip::from(&mut current)
            .and(end.index_axis_mut(Axis(1), t))
            .and(active.index_axis(Axis(1), t))
            .for_each(|cur, out, &a| {
                if !a {
                    *cur = -1;
                } else if *cur < 0 {
                    *cur = t as i64;
                }
                *out = *cur;
            });
    }

    let mut length = Array3::zeros((batch, frames, features));
    Zip::from(&mut length)
        .and(&start)
        .and(&end)
        .and(active)
        .for_each(|len, &s, &e, &a| {
            if a {
                *len = e - s + 1;
            }
        });

    SegmentBounds { length, start, end }
}
