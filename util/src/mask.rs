use std::io;

use ndarray::{Array3, ArrayView3};

use crate::element::{ElementKind, MaskElement};
use crate::segments::{segments, Segment};
use crate::shape::CanonicalShape;
use crate::MaskError;

///
/// A batched mask sequence in row-major order together with its dims
///
/// The dims may have any rank; operators check for a supported rank (2, 3
/// or 4) when they run. Operators never mutate a `MaskBatch`, they always
/// return a new one with identical dims.
///
#[derive(Debug, Clone, PartialEq)]
pub struct MaskBatch<T: MaskElement> {
    dims: Vec<usize>,
    values: Vec<T>,
}

impl<T: MaskElement> MaskBatch<T> {

    ///
    /// Wraps row-major `values` of the given dims. The value count must equal
    /// the product of the dims.
    ///
    pub fn new(dims: Vec<usize>, values: Vec<T>) -> Result<Self, MaskError> {
        let expected = element_count(&dims)?;
        if expected != values.len() {
            return Err(MaskError::LengthMismatch { expected, actual: values.len() });
        }
        Ok(MaskBatch { dims, values })
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn kind(&self) -> ElementKind {
        T::KIND
    }

    /// Number of active positions
    pub fn active_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_active()).count()
    }

    /// The canonical layout of this mask (fails for unsupported ranks)
    pub fn canonical_shape(&self) -> Result<CanonicalShape, MaskError> {
        CanonicalShape::from_dims(&self.dims)
    }

    ///
    /// Canonical boolean activation in the flattened `(B, T, H*W)` track
    /// layout
    ///
    pub(crate) fn activation(&self, shape: &CanonicalShape) -> Result<Array3<bool>, MaskError> {
        let active: Vec<bool> = self.values.iter().map(|v| v.is_active()).collect();
        to_tracks(shape, active)
    }

    /// Original values in the flattened `(B, T, H*W)` track layout
    pub(crate) fn tracks_view(&self, shape: &CanonicalShape) -> Result<ArrayView3<T>, MaskError> {
        ArrayView3::from_shape(shape.tracks_dim(), &self.values)
            .map_err(|_| MaskError::LengthMismatch { expected: shape.len(), actual: self.values.len() })
    }

    ///
    /// Active runs of the track at batch `b`, row `h`, column `w` (canonical
    /// coordinates). Returns `None` if the coordinate is out of range.
    ///
    pub fn track_segments(&self, b: usize, h: usize, w: usize) -> Result<Option<Vec<Segment>>, MaskError> {
        let shape = self.canonical_shape()?;
        if b >= shape.batch || h >= shape.height || w >= shape.width {
            return Ok(None);
        }
        let feature = h * shape.width + w;
        let track: Vec<bool> = (0..shape.frames)
            .map(|t| self.values[(b * shape.frames + t) * shape.features() + feature].is_active())
            .collect();
        Ok(Some(segments(&track)))
    }
}

///
/// Restores a canonical 0/1 activation to the representation of `T`, shaped
/// like `shape`'s original dims
///
pub(crate) fn from_activation<T: MaskElement>(shape: &CanonicalShape, active: Array3<bool>) -> MaskBatch<T> {
    let values = active.iter().map(|&a| T::from_active(a)).collect();
    MaskBatch { dims: shape.restore(), values }
}

///
/// Restores already converted values (in canonical order) to the original
/// dims of `shape`
///
pub(crate) fn from_values<T: MaskElement>(shape: &CanonicalShape, values: Array3<T>) -> MaskBatch<T> {
    MaskBatch { dims: shape.restore(), values: values.iter().copied().collect() }
}

pub(crate) fn to_tracks<A>(shape: &CanonicalShape, values: Vec<A>) -> Result<Array3<A>, MaskError> {
    let actual = values.len();
    Array3::from_shape_vec(shape.tracks_dim(), values)
        .map_err(|_| MaskError::LengthMismatch { expected: shape.len(), actual })
}

///
/// A mask sequence of any supported element representation
///
/// Used where the element type is only known at runtime (raw persistence and
/// the C bindings).
///
#[derive(Debug, Clone, PartialEq)]
pub enum AnyMask {
    Bool(MaskBatch<bool>),
    U8(MaskBatch<u8>),
    I8(MaskBatch<i8>),
    I16(MaskBatch<i16>),
    I32(MaskBatch<i32>),
    I64(MaskBatch<i64>),
    U16(MaskBatch<u16>),
    U32(MaskBatch<u32>),
    U64(MaskBatch<u64>),
    F32(MaskBatch<f32>),
    F64(MaskBatch<f64>),
}

/// Applies `$body` to the inner `MaskBatch` of any variant
#[macro_export]
macro_rules! with_mask {
    ($any:expr, $m:ident => $body:expr) => {
        match $any {
            $crate::AnyMask::Bool($m) => $body,
            $crate::AnyMask::U8($m) => $body,
            $crate::AnyMask::I8($m) => $body,
            $crate::AnyMask::I16($m) => $body,
            $crate::AnyMask::I32($m) => $body,
            $crate::AnyMask::I64($m) => $body,
            $crate::AnyMask::U16($m) => $body,
            $crate::AnyMask::U32($m) => $body,
            $crate::AnyMask::U64($m) => $body,
            $crate::AnyMask::F32($m) => $body,
            $crate::AnyMask::F64($m) => $body,
        }
    };
}

/// Like `with_mask!` but wraps a returned `MaskBatch` back into the same variant
macro_rules! map_mask {
    ($any:expr, $m:ident => $body:expr) => {
        match $any {
            AnyMask::Bool($m) => AnyMask::Bool($body),
            AnyMask::U8($m) => AnyMask::U8($body),
            AnyMask::I8($m) => AnyMask::I8($body),
            AnyMask::I16($m) => AnyMask::I16($body),
            AnyMask::I32($m) => AnyMask::I32($body),
            AnyMask::I64($m) => AnyMask::I64($body),
            AnyMask::U16($m) => AnyMask::U16($body),
            AnyMask::U32($m) => AnyMask::U32($body),
            AnyMask::U64($m) => AnyMask::U64($body),
            AnyMask::F32($m) => AnyMask::F32($body),
            AnyMask::F64($m) => AnyMask::F64($body),
        }
    };
}

pub(crate) use map_mask;

impl AnyMask {

    pub fn kind(&self) -> ElementKind {
        with_mask!(self, m => m.kind())
    }

    pub fn dims(&self) -> &[usize] {
        with_mask!(self, m => m.dims())
    }

    pub fn len(&self) -> usize {
        with_mask!(self, m => m.values().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn active_count(&self) -> usize {
        with_mask!(self, m => m.active_count())
    }

    /// Size of the values in the raw little-endian layout
    pub fn byte_len(&self) -> usize {
        self.len() * self.kind().byte_width()
    }

    ///
    /// Builds a mask of the given kind and dims by decoding little-endian
    /// `bytes`
    ///
    pub fn from_le_bytes(kind: ElementKind, dims: Vec<usize>, bytes: &[u8]) -> Result<Self, MaskError> {
        let count = element_count(&dims)?;
        let expected = count.checked_mul(kind.byte_width())
            .ok_or_else(|| MaskError::DimsOverflow { dims: dims.clone() })?;
        if bytes.len() != expected {
            return Err(MaskError::LengthMismatch { expected, actual: bytes.len() });
        }
        let mut rdr = bytes;
        let mask = match kind {
            ElementKind::Bool => AnyMask::Bool(decode(dims, count, &mut rdr)?),
            ElementKind::U8 => AnyMask::U8(decode(dims, count, &mut rdr)?),
            ElementKind::I8 => AnyMask::I8(decode(dims, count, &mut rdr)?),
            ElementKind::I16 => AnyMask::I16(decode(dims, count, &mut rdr)?),
            ElementKind::I32 => AnyMask::I32(decode(dims, count, &mut rdr)?),
            ElementKind::I64 => AnyMask::I64(decode(dims, count, &mut rdr)?),
            ElementKind::U16 => AnyMask::U16(decode(dims, count, &mut rdr)?),
            ElementKind::U32 => AnyMask::U32(decode(dims, count, &mut rdr)?),
            ElementKind::U64 => AnyMask::U64(decode(dims, count, &mut rdr)?),
            ElementKind::F32 => AnyMask::F32(decode(dims, count, &mut rdr)?),
            ElementKind::F64 => AnyMask::F64(decode(dims, count, &mut rdr)?),
        };
        Ok(mask)
    }

    /// Encodes the values (without dims) as little-endian bytes
    pub fn to_le_bytes(&self) -> io::Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.byte_len());
        with_mask!(self, m => {
            for v in m.values() {
                v.write_le(&mut bytes)?;
            }
        });
        Ok(bytes)
    }
}

///
/// Product of `dims`, failing with `MaskError::DimsOverflow` when it does not
/// fit in `usize`
///
pub(crate) fn element_count(dims: &[usize]) -> Result<usize, MaskError> {
    dims.iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| MaskError::DimsOverflow { dims: dims.to_vec() })
}

fn decode<T: MaskElement>(dims: Vec<usize>, count: usize, rdr: &mut &[u8]) -> Result<MaskBatch<T>, MaskError> {
    let values = (0..count)
        .map(|_| T::read_le(rdr))
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| MaskError::InternalError { msg: format!("Error decoding mask values ({})", e) })?;
    MaskBatch::new(dims, values)
}

macro_rules! any_from {
    ($t:ty, $variant:ident) => {
        impl From<MaskBatch<$t>> for AnyMask {
            fn from(mask: MaskBatch<$t>) -> Self {
                AnyMask::$variant(mask)
            }
        }
    };
}

any_from!(bool, Bool);
any_from!(u8, U8);
any_from!(i8, I8);
any_from!(i16, I16);
any_from!(i32, I32);
any_from!(i64, I64);
any_from!(u16, U16);
any_from!(u32, U32);
any_from!(u64, U64);
any_from!(f32, F32);
any_from!(f64, F64);
