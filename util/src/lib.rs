use std::fmt;
use std::error::Error;

use log::*;

mod element;
mod mask;
mod options;
mod raw;
mod shape;

///
/// Per-track run analysis (segment bounds and run listing)
///
pub mod segments;

///
/// Nearest preceding/following active frame of every position
///
pub mod neighbors;

/// Short-segment removal and hold interpolation across gaps
pub mod gaps;

/// Duration pruning from forward/backward run counters
pub mod duration;

///
/// Temporal morphological operators: sliding-window union and majority vote
///
pub mod morph;

/// 8-connected component labeling of a single plane
pub mod label;

/// Per-frame removal of small connected components
pub mod area;

pub use element::{ElementKind, MaskElement};
pub use mask::{AnyMask, MaskBatch};
pub use options::{FillGapsOptions, FusionMode, RemoveShortOptions, UnionOptions};
pub use raw::{MaskLoadError, MaskSaveError};
pub use segments::Segment;
pub use shape::CanonicalShape;

use mask::{from_activation, from_values, map_mask, to_tracks};
use options::to_count;

use MaskError::*;

///
/// Fills short inactive spans between active segments by repeating the value
/// of the preceding active frame.
///
/// Segments shorter than `min_duration` are removed first so that filling
/// never bridges across them. A gap is filled only when it is bounded by
/// active frames on both sides and spans at most `max_gap_frames` frames.
/// Kept positions keep their original value, filled positions copy the
/// preceding active value and every other position becomes zero.
///
pub fn fill_gaps<T: MaskElement>(mask: &MaskBatch<T>, opt: &FillGapsOptions) -> Result<MaskBatch<T>, MaskError> {
    opt.validate()?;
    let shape = mask.canonical_shape()?;

    if opt.debug_output {
        info!("fill_gaps: shape={:?} kind={} max_gap_frames={} min_duration={}",
            shape.original_dims(), T::KIND, opt.max_gap_frames, opt.min_duration);
    }
    debug!("fill_gaps: canonical shape {:?}", (shape.batch, shape.frames, shape.height, shape.width));

    let mut active = mask.activation(&shape)?;
    let removed = gaps::drop_short_segments(&mut active, to_count(opt.min_duration));
    trace!("fill_gaps: removed {} positions in short segments", removed);

    let values = mask.tracks_view(&shape)?;
    let (result, filled) = gaps::hold_fill(values, active.view(), to_count(opt.max_gap_frames));
    trace!("fill_gaps: filled {} gap positions", filled);

    Ok(from_values(&shape, result))
}

///
/// Removes activations that are spatially too small or temporally too short.
///
/// Each frame is first cleared of 8-connected components with fewer than
/// `min_area_pixels` pixels, then every position whose active run lasts
/// fewer than `min_duration` frames is cleared. The result is a 0/1 mask in
/// the input's representation.
///
pub fn remove_short_objects<T: MaskElement>(mask: &MaskBatch<T>, opt: &RemoveShortOptions) -> Result<MaskBatch<T>, MaskError> {
    opt.validate()?;
    let shape = mask.canonical_shape()?;

    debug!("remove_short_objects: shape={:?} min_duration={} min_area_pixels={}",
        shape.original_dims(), opt.min_duration, opt.min_area_pixels);

    let active: Vec<bool> = mask.values().iter().map(|v| v.is_active()).collect();
    let mut planes = ndarray::Array3::from_shape_vec(shape.planes_dim(), active)
        .map_err(|e| InternalError { msg: format!("Error arranging frames ({})", e) })?;
    let components = area::prune_area(&mut planes, to_count(opt.min_area_pixels));
    trace!("remove_short_objects: removed {} small components", components);

    let active = to_tracks(&shape, planes.into_raw_vec())?;
    let (kept, removed) = duration::prune_duration(active.view(), to_count(opt.min_duration));
    trace!("remove_short_objects: removed {} positions in short runs", removed);

    Ok(from_activation(&shape, kept))
}

///
/// Combines nearby frames within a symmetric window of `radius` frames,
/// either by logical OR or by majority vote.
///
/// Frames beyond either end of the sequence count as inactive. In majority
/// mode a `threshold` above the window size `2 * radius + 1` is capped to it.
/// The result is a 0/1 mask in the input's representation.
///
pub fn temporal_union<T: MaskElement>(mask: &MaskBatch<T>, opt: &UnionOptions) -> Result<MaskBatch<T>, MaskError> {
    opt.validate()?;
    let shape = mask.canonical_shape()?;

    debug!("temporal_union: shape={:?} radius={} mode={} threshold={}",
        shape.original_dims(), opt.radius, opt.mode, opt.threshold);

    let active = mask.activation(&shape)?;
    let merged = morph::fuse(active.view(), to_count(opt.radius), opt.mode, to_count(opt.threshold));

    Ok(from_activation(&shape, merged))
}

impl AnyMask {

    /// See `fill_gaps`
    pub fn fill_gaps(&self, opt: &FillGapsOptions) -> Result<AnyMask, MaskError> {
        Ok(map_mask!(self, m => fill_gaps(m, opt)?))
    }

    /// See `remove_short_objects`
    pub fn remove_short_objects(&self, opt: &RemoveShortOptions) -> Result<AnyMask, MaskError> {
        Ok(map_mask!(self, m => remove_short_objects(m, opt)?))
    }

    /// See `temporal_union`
    pub fn temporal_union(&self, opt: &UnionOptions) -> Result<AnyMask, MaskError> {
        Ok(map_mask!(self, m => temporal_union(m, opt)?))
    }
}

///
/// Represents errors that may occur while processing a mask sequence
///
#[derive(Debug)]
pub enum MaskError {
    Shape { rank: usize },
    LengthMismatch { expected: usize, actual: usize },
    DimsOverflow { dims: Vec<usize> },
    UnsupportedType { kind: String },
    Validation { param: &'static str, msg: String },
    InternalError { msg: String },
}

impl Error for MaskError {}

impl fmt::Display for MaskError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Shape { rank } => write!(f, "Mask must have 2, 3, or 4 dimensions (rank={})", rank),
            LengthMismatch { expected, actual } => write!(f, "Mask data does not match its dimensions (expected={}, actual={})", expected, actual),
            DimsOverflow { dims } => write!(f, "Mask dimensions are too large (dims={:?})", dims),
            UnsupportedType { kind } => write!(f, "Mask must be bool or numeric (kind='{}')", kind),
            Validation { param, msg } => write!(f, "Invalid parameter '{}': {}", param, msg),
            InternalError { msg } => write!(f, "Unknown mask error occurred (msg='{}')", msg)
        }
    }
}
