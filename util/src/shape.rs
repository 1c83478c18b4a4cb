use crate::MaskError;

///
/// Canonical (batch, frame, row, col) layout of a mask sequence
///
/// Inputs of rank 2 `(H, W)` are a single frame of a single batch, rank 3
/// `(T, H, W)` a single batch, and rank 4 `(B, T, H, W)` is taken as is.
/// The original dims are kept so results can be handed back in the exact
/// shape they arrived in.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalShape {
    pub batch: usize,
    pub frames: usize,
    pub height: usize,
    pub width: usize,
    original: Vec<usize>,
}

impl CanonicalShape {

    ///
    /// Normalizes the given dims, failing with `MaskError::Shape` for any
    /// rank outside of 2..=4
    ///
    pub fn from_dims(dims: &[usize]) -> Result<Self, MaskError> {
        let (batch, frames, height, width) = match *dims {
            [h, w] => (1, 1, h, w),
            [t, h, w] => (1, t, h, w),
            [b, t, h, w] => (b, t, h, w),
            _ => return Err(MaskError::Shape { rank: dims.len() }),
        };
        Ok(CanonicalShape { batch, frames, height, width, original: dims.to_vec() })
    }

    /// Number of spatial positions per frame (`H * W`)
    pub fn features(&self) -> usize {
        self.height * self.width
    }

    /// Total element count
    pub fn len(&self) -> usize {
        self.batch * self.frames * self.features()
    }

    /// Flattened `(B, T, H*W)` layout used by the time-axis scans
    pub fn tracks_dim(&self) -> (usize, usize, usize) {
        (self.batch, self.frames, self.features())
    }

    /// `(B*T, H, W)` layout used by the per-frame spatial operators
    pub fn planes_dim(&self) -> (usize, usize, usize) {
        (self.batch * self.frames, self.height, self.width)
    }

    /// The dims this shape was created from
    pub fn original_dims(&self) -> &[usize] {
        &self.original
    }

    /// The dims results are restored to (identical to the input's)
    pub fn restore(&self) -> Vec<usize> {
        self.original.clone()
    }
}
