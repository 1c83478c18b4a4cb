use std::fmt;
use std::fs::File;
use std::path::Path;
use std::io;
use std::io::prelude::*;
use std::io::{BufReader, BufWriter, Cursor};
use std::io::ErrorKind::NotFound;
use std::error::Error;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::{AnyMask, ElementKind};

use MaskLoadError::*;
use MaskSaveError::*;

///
/// Raw mask persistence
///
/// Masks can be written to disk between pipeline stages (or dumped for
/// inspection) in a little-endian layout: `[kind: u8][rank: u32]`, then each
/// dim as `u64`, then the values as produced by `AnyMask::to_le_bytes`.
///
impl AnyMask {

    ///
    /// Saves raw mask data to disk
    ///
    pub fn save(&self, filename: &str) -> Result<(), MaskSaveError> {
        let file = File::create(Path::new(filename))
            .map_err(|cause| WriteError { cause })?;
        let bytes: Vec<u8> = self.try_into()
            .map_err(|cause| SerializeError { cause })?;
        let mut writer = BufWriter::new(file);
        writer.write_all(bytes.as_slice())
            .and_then(|_| writer.flush())
            .map_err(|cause| WriteError { cause })?;
        Ok(())
    }

    ///
    /// Loads raw mask data from disk
    ///
    pub fn load(filename: &str) -> Result<Self, MaskLoadError> {
        let file = File::open(Path::new(filename))
            .map_err(|cause| match cause.kind() {
                NotFound => FileNotFound { path: filename.to_string() },
                _ => ReadError { cause, path: filename.to_string() }
            })?;
        let bytes = &mut vec![];
        BufReader::new(file)
            .read_to_end(bytes)
            .map_err(|cause| ReadError { cause, path: filename.to_string() })?;
        let mask = Self::try_from(bytes.as_slice())
            .map_err(|cause| DeserializeError { cause })?;
        Ok(mask)
    }
}

///
/// Serializes an `AnyMask` instance to raw bytes
///
impl<'a> TryInto<Vec<u8>> for &'a AnyMask {
    type Error = io::Error;

    fn try_into(self) -> Result<Vec<u8>, Self::Error> {
        let dims = self.dims();
        let mut bytes = Vec::with_capacity(5 + dims.len() * 8 + self.byte_len());
        bytes.write_u8(self.kind().code() as u8)?;
        bytes.write_u32::<LittleEndian>(dims.len() as u32)?;
        for &d in dims {
            bytes.write_u64::<LittleEndian>(d as u64)?;
        }
        bytes.extend_from_slice(&self.to_le_bytes()?);
        Ok(bytes)
    }
}

///
/// Deserializes an `AnyMask` instance from raw bytes
///
impl TryFrom<&[u8]> for AnyMask {
    type Error = io::Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let invalid = |e: crate::MaskError| io::Error::new(io::ErrorKind::InvalidData, e.to_string());

        let mut rdr = Cursor::new(bytes);
        let kind = ElementKind::from_code(rdr.read_u8()? as u32).map_err(invalid)?;
        let rank = rdr.read_u32::<LittleEndian>()?;
        let dims = (0..rank)
            .map(|_| rdr.read_u64::<LittleEndian>().map(|d| d as usize))
            .collect::<Result<Vec<usize>, io::Error>>()?;
        let offset = rdr.position() as usize;
        AnyMask::from_le_bytes(kind, dims, &bytes[offset..]).map_err(invalid)
    }
}

///
/// Represents an error reading raw mask data from disk
///
#[derive(Debug)]
pub enum MaskLoadError {
    FileNotFound { path: String },
    ReadError { cause: io::Error, path: String },
    DeserializeError { cause: io::Error },
}

impl Error for MaskLoadError {}

impl fmt::Display for MaskLoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FileNotFound { path } => write!(f, "Mask file does not exist (path='{}')", path),
            ReadError { cause, path } => write!(f, "Error reading mask from disk (msg='{}', path='{}')", cause, path),
            DeserializeError { cause } => write!(f, "Error parsing mask from bytes (msg='{}')", cause)
        }
    }
}

///
/// Represents an error writing raw mask data to disk
///
#[derive(Debug)]
pub enum MaskSaveError {
    SerializeError { cause: io::Error },
    WriteError { cause: io::Error }
}

impl Error for MaskSaveError {}

impl fmt::Display for MaskSaveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SerializeError { cause } => write!(f, "Error serializing mask to bytes! (msg='{}')", cause),
            WriteError { cause } => write!(f, "Error saving mask data to disk! (msg='{}')", cause)
        }
    }
}
