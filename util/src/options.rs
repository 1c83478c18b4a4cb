use std::fmt;
use std::str::FromStr;

use crate::MaskError;

///
/// Options for `fill_gaps`
///
/// * `max_gap_frames`: Longest inactive span (frames) between two active
///    segments that will be filled. Zero disables filling. (default `3`)
///
/// * `min_duration`: Active segments shorter than this are removed before
///    gaps are measured, so filling never bridges across them. (default `2`)
///
/// * `debug_output`: Logs the configuration and input shape at info level
///    when the operation runs. (default `false`)
///
#[derive(Debug, Clone, PartialEq)]
pub struct FillGapsOptions {
    pub max_gap_frames: i64,
    pub min_duration: i64,
    pub debug_output: bool,
}

impl Default for FillGapsOptions {
    fn default() -> Self {
        FillGapsOptions {
            max_gap_frames: 3,
            min_duration: 2,
            debug_output: false,
        }
    }
}

impl FillGapsOptions {
    pub fn validate(&self) -> Result<(), MaskError> {
        non_negative("max_gap_frames", self.max_gap_frames)?;
        at_least_one("min_duration", self.min_duration)?;
        Ok(())
    }
}

///
/// Options for `remove_short_objects`
///
/// * `min_duration`: Minimum number of consecutive frames a position must
///    stay active to be kept. (default `2`)
///
/// * `min_area_pixels`: 8-connected components with fewer active pixels
///    than this are removed from their frame. Zero disables area pruning.
///    (default `10`)
///
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveShortOptions {
    pub min_duration: i64,
    pub min_area_pixels: i64,
}

impl Default for RemoveShortOptions {
    fn default() -> Self {
        RemoveShortOptions {
            min_duration: 2,
            min_area_pixels: 10,
        }
    }
}

impl RemoveShortOptions {
    pub fn validate(&self) -> Result<(), MaskError> {
        at_least_one("min_duration", self.min_duration)?;
        non_negative("min_area_pixels", self.min_area_pixels)?;
        Ok(())
    }
}

///
/// How frames within a temporal window are combined
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FusionMode {
    /// Active if any frame in the window is active
    Or,
    /// Active if at least `threshold` frames in the window are active
    Majority,
}

impl fmt::Display for FusionMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FusionMode::Or => write!(f, "or"),
            FusionMode::Majority => write!(f, "majority"),
        }
    }
}

impl FromStr for FusionMode {
    type Err = MaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "or" => Ok(FusionMode::Or),
            "majority" => Ok(FusionMode::Majority),
            _ => Err(MaskError::Validation {
                param: "mode",
                msg: format!("must be 'or' or 'majority' (value='{}')", s),
            }),
        }
    }
}

///
/// Options for `temporal_union`
///
/// * `radius`: Half width of the temporal window in frames; the window spans
///    `2 * radius + 1` frames. Zero makes the operation an identity.
///    (default `2`)
///
/// * `mode`: `Or` unions the window, `Majority` votes. (default `Or`)
///
/// * `threshold`: Active frames required in `Majority` mode. Values above the
///    window size are capped to it. (default `3`)
///
#[derive(Debug, Clone, PartialEq)]
pub struct UnionOptions {
    pub radius: i64,
    pub mode: FusionMode,
    pub threshold: i64,
}

impl Default for UnionOptions {
    fn default() -> Self {
        UnionOptions {
            radius: 2,
            mode: FusionMode::Or,
            threshold: 3,
        }
    }
}

impl UnionOptions {
    pub fn validate(&self) -> Result<(), MaskError> {
        non_negative("radius", self.radius)?;
        at_least_one("threshold", self.threshold)?;
        Ok(())
    }
}

fn non_negative(param: &'static str, value: i64) -> Result<(), MaskError> {
    if value < 0 {
        Err(MaskError::Validation { param, msg: format!("must be non-negative (value={})", value) })
    } else {
        Ok(())
    }
}

fn at_least_one(param: &'static str, value: i64) -> Result<(), MaskError> {
    if value < 1 {
        Err(MaskError::Validation { param, msg: format!("must be at least 1 (value={})", value) })
    } else {
        Ok(())
    }
}

///
/// Converts an already validated parameter to an index-sized count
///
pub(crate) fn to_count(value: i64) -> usize {
    usize::try_from(value.max(0)).unwrap_or(usize::MAX)
}
