use std::fmt;
use std::io;
use std::io::{Read, Write};
use std::str::FromStr;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::MaskError;

///
/// A value that can be stored in a mask sequence
///
/// Every representation reduces to a boolean "active" flag (see `is_active`)
/// and can be rebuilt from one (see `from_active`). Floating-point values are
/// active when strictly positive, integers when non-zero.
///
pub trait MaskElement: Copy + Send + Sync + fmt::Debug + 'static {

    /// The representation tag of this element type
    const KIND: ElementKind;

    /// Whether this value marks an active position
    fn is_active(self) -> bool;

    /// Value-preserving cast of a canonical 0/1 result
    fn from_active(active: bool) -> Self;

    /// The inactive value
    fn zero() -> Self {
        Self::from_active(false)
    }

    /// Reads a single little-endian value
    fn read_le<R: Read>(rdr: &mut R) -> io::Result<Self>;

    /// Writes a single little-endian value
    fn write_le<W: Write>(self, wtr: &mut W) -> io::Result<()>;
}

impl MaskElement for bool {
    const KIND: ElementKind = ElementKind::Bool;

    fn is_active(self) -> bool { self }

    fn from_active(active: bool) -> Self { active }

    fn read_le<R: Read>(rdr: &mut R) -> io::Result<Self> {
        Ok(rdr.read_u8()? != 0)
    }

    fn write_le<W: Write>(self, wtr: &mut W) -> io::Result<()> {
        wtr.write_u8(self as u8)
    }
}

impl MaskElement for u8 {
    const KIND: ElementKind = ElementKind::U8;

    fn is_active(self) -> bool { self != 0 }

    fn from_active(active: bool) -> Self { active as u8 }

    fn read_le<R: Read>(rdr: &mut R) -> io::Result<Self> { rdr.read_u8() }

    fn write_le<W: Write>(self, wtr: &mut W) -> io::Result<()> { wtr.write_u8(self) }
}

impl MaskElement for i8 {
    const KIND: ElementKind = ElementKind::I8;

    fn is_active(self) -> bool { self != 0 }

    fn from_active(active: bool) -> Self { active as i8 }

    fn read_le<R: Read>(rdr: &mut R) -> io::Result<Self> { rdr.read_i8() }

    fn write_le<W: Write>(self, wtr: &mut W) -> io::Result<()> { wtr.write_i8(self) }
}

// Multi-byte integers share everything except the byteorder accessor names
macro_rules! int_element {
    ($t:ty, $kind:ident, $read:ident, $write:ident) => {
        impl MaskElement for $t {
            const KIND: ElementKind = ElementKind::$kind;

            fn is_active(self) -> bool { self != 0 }

            fn from_active(active: bool) -> Self { active as $t }

            fn read_le<R: Read>(rdr: &mut R) -> io::Result<Self> {
                rdr.$read::<LittleEndian>()
            }

            fn write_le<W: Write>(self, wtr: &mut W) -> io::Result<()> {
                wtr.$write::<LittleEndian>(self)
            }
        }
    };
}

int_element!(u16, U16, read_u16, write_u16);
int_element!(u32, U32, read_u32, write_u32);
int_element!(u64, U64, read_u64, write_u64);
int_element!(i16, I16, read_i16, write_i16);
int_element!(i32, I32, read_i32, write_i32);
int_element!(i64, I64, read_i64, write_i64);

macro_rules! float_element {
    ($t:ty, $kind:ident, $read:ident, $write:ident) => {
        impl MaskElement for $t {
            const KIND: ElementKind = ElementKind::$kind;

            // NaN and negative values are inactive
            fn is_active(self) -> bool { self > 0.0 }

            fn from_active(active: bool) -> Self { if active { 1.0 } else { 0.0 } }

            fn read_le<R: Read>(rdr: &mut R) -> io::Result<Self> {
                rdr.$read::<LittleEndian>()
            }

            fn write_le<W: Write>(self, wtr: &mut W) -> io::Result<()> {
                wtr.$write::<LittleEndian>(self)
            }
        }
    };
}

float_element!(f32, F32, read_f32, write_f32);
float_element!(f64, F64, read_f64, write_f64);

///
/// Element representations accepted by the engine
///
/// The numeric codes are stable and shared with the C bindings and the raw
/// on-disk layout.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Bool,
    U8,
    I8,
    I16,
    I32,
    I64,
    U16,
    U32,
    U64,
    F32,
    F64,
}

impl ElementKind {

    pub const ALL: [ElementKind; 11] = [
        ElementKind::Bool, ElementKind::U8, ElementKind::I8, ElementKind::I16,
        ElementKind::I32, ElementKind::I64, ElementKind::U16, ElementKind::U32,
        ElementKind::U64, ElementKind::F32, ElementKind::F64,
    ];

    /// Stable numeric code of this representation
    pub fn code(self) -> u32 {
        match self {
            ElementKind::Bool => 0,
            ElementKind::U8 => 1,
            ElementKind::I8 => 2,
            ElementKind::I16 => 3,
            ElementKind::I32 => 4,
            ElementKind::I64 => 5,
            ElementKind::U16 => 6,
            ElementKind::U32 => 7,
            ElementKind::U64 => 8,
            ElementKind::F32 => 9,
            ElementKind::F64 => 10,
        }
    }

    ///
    /// Looks up a representation by numeric code, failing with
    /// `MaskError::UnsupportedType` for unknown codes
    ///
    pub fn from_code(code: u32) -> Result<Self, MaskError> {
        ElementKind::ALL.iter()
            .copied()
            .find(|k| k.code() == code)
            .ok_or_else(|| MaskError::UnsupportedType { kind: format!("code {}", code) })
    }

    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Bool => "bool",
            ElementKind::U8 => "uint8",
            ElementKind::I8 => "int8",
            ElementKind::I16 => "int16",
            ElementKind::I32 => "int32",
            ElementKind::I64 => "int64",
            ElementKind::U16 => "uint16",
            ElementKind::U32 => "uint32",
            ElementKind::U64 => "uint64",
            ElementKind::F32 => "float32",
            ElementKind::F64 => "float64",
        }
    }

    /// Width of a single element in the raw little-endian layout
    pub fn byte_width(self) -> usize {
        match self {
            ElementKind::Bool | ElementKind::U8 | ElementKind::I8 => 1,
            ElementKind::I16 | ElementKind::U16 => 2,
            ElementKind::I32 | ElementKind::U32 | ElementKind::F32 => 4,
            ElementKind::I64 | ElementKind::U64 | ElementKind::F64 => 8,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ElementKind {
    type Err = MaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_lowercase();
        let kind = match norm.as_str() {
            "bool" | "boolean" => ElementKind::Bool,
            "uint8" | "u8" => ElementKind::U8,
            "int8" | "i8" => ElementKind::I8,
            "int16" | "i16" | "short" => ElementKind::I16,
            "int32" | "i32" | "int" => ElementKind::I32,
            "int64" | "i64" | "long" => ElementKind::I64,
            "uint16" | "u16" => ElementKind::U16,
            "uint32" | "u32" => ElementKind::U32,
            "uint64" | "u64" => ElementKind::U64,
            "float32" | "f32" | "float" => ElementKind::F32,
            "float64" | "f64" | "double" => ElementKind::F64,
            _ => return Err(MaskError::UnsupportedType { kind: s.to_string() }),
        };
        Ok(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_truthiness_is_strictly_positive() {
        assert!(0.25f32.is_active());
        assert!(!0.0f32.is_active());
        assert!(!(-0.0f64).is_active());
        assert!(!(-3.0f64).is_active());
        assert!(!f32::NAN.is_active());
    }

    #[test]
    fn integer_truthiness_is_nonzero() {
        assert!((-1i8).is_active());
        assert!(7u64.is_active());
        assert!(!0i32.is_active());
    }

    #[test]
    fn from_active_is_zero_or_one() {
        assert_eq!(i16::from_active(true), 1);
        assert_eq!(f64::from_active(false), 0.0);
        assert_eq!(u8::zero(), 0);
        assert!(!bool::zero());
    }

    #[test]
    fn kind_codes_round_trip() {
        for kind in ElementKind::ALL.iter() {
            assert_eq!(ElementKind::from_code(kind.code()).unwrap(), *kind);
            assert_eq!(kind.name().parse::<ElementKind>().unwrap(), *kind);
        }
    }

    #[test]
    fn unknown_kinds_are_rejected() {
        assert!(matches!(ElementKind::from_code(42), Err(MaskError::UnsupportedType { .. })));
        assert!(matches!("complex64".parse::<ElementKind>(), Err(MaskError::UnsupportedType { .. })));
        assert_eq!("Float32".parse::<ElementKind>().unwrap(), ElementKind::F32);
    }
}
