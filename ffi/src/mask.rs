use crate::util::*;
use crate::result_codes::*;
use crate::catch_panic;

use std::ptr;
use std::os::raw::c_char;

use tempmask_util::{AnyMask, ElementKind};

use log::error;

pub type KindCode = u32;

#[no_mangle] pub static TEMPMASK_KIND_BOOL: KindCode = 0;
#[no_mangle] pub static TEMPMASK_KIND_U8:   KindCode = 1;
#[no_mangle] pub static TEMPMASK_KIND_I8:   KindCode = 2;
#[no_mangle] pub static TEMPMASK_KIND_I16:  KindCode = 3;
#[no_mangle] pub static TEMPMASK_KIND_I32:  KindCode = 4;
#[no_mangle] pub static TEMPMASK_KIND_I64:  KindCode = 5;
#[no_mangle] pub static TEMPMASK_KIND_U16:  KindCode = 6;
#[no_mangle] pub static TEMPMASK_KIND_U32:  KindCode = 7;
#[no_mangle] pub static TEMPMASK_KIND_U64:  KindCode = 8;
#[no_mangle] pub static TEMPMASK_KIND_F32:  KindCode = 9;
#[no_mangle] pub static TEMPMASK_KIND_F64:  KindCode = 10;

///
/// Creates a mask handle by copying caller-owned data.
///
/// * `kind`: Element representation (one of the `TEMPMASK_KIND_*` codes).
/// * `dims`, `rank`: Original dimensions of the mask; rank must be 2, 3 or 4
///    by the time an operation runs.
/// * `data`, `byte_len`: Little-endian element values. Booleans are one byte
///    each. `byte_len` must equal the product of `dims` times the element
///    width.
///
/// The new handle is written to `out` and must be released with
/// `tempmask_mask_free()`.
///
#[catch_panic(TEMPMASK_INTERNAL_ERROR)]
#[no_mangle]
pub extern "C" fn tempmask_mask_new(
        kind: KindCode,
        dims: *const usize,
        rank: usize,
        data: *const u8,
        byte_len: usize,
        out: *mut *mut AnyMask)
    -> ResultCode {

    if out.is_null() {
        error!("Invalid parameter: out is null");
        return TEMPMASK_INVALID_PARAMS;
    }

    let kind = match ElementKind::from_code(kind) {
        Ok(kind) => kind,
        Err(e) => {
            error!("{}", e);
            return mask_error_code(&e);
        }
    };

    let dims = match slice_from_raw(dims, rank) {
        Some(dims) => dims.to_vec(),
        None => {
            error!("Invalid parameter: dims is null");
            return TEMPMASK_INVALID_PARAMS;
        }
    };

    let bytes = match slice_from_raw(data, byte_len) {
        Some(bytes) => bytes,
        None => {
            error!("Invalid parameter: data is null");
            return TEMPMASK_INVALID_PARAMS;
        }
    };

    match AnyMask::from_le_bytes(kind, dims, bytes) {
        Ok(mask) => {
            write_out(out, to_ptr(mask));
            TEMPMASK_SUCCESS
        },
        Err(e) => {
            error!("{}", e);
            mask_error_code(&e)
        }
    }
}

///
/// Element representation code of the mask, or `u32::MAX` if the handle is
/// null.
///
#[catch_panic(u32::MAX)]
#[no_mangle]
pub extern "C" fn tempmask_mask_kind(mask: *const AnyMask) -> KindCode {
    match borrow(mask) {
        Some(mask) => mask.kind().code(),
        None => {
            error!("Invalid parameter: mask is null");
            u32::MAX
        }
    }
}

///
/// Number of dimensions of the mask (zero if the handle is null)
///
#[catch_panic(0)]
#[no_mangle]
pub extern "C" fn tempmask_mask_rank(mask: *const AnyMask) -> usize {
    borrow(mask).map(|m| m.dims().len()).unwrap_or(0)
}

///
/// Size of dimension `axis` (zero if the handle is null or the axis is out
/// of range)
///
#[catch_panic(0)]
#[no_mangle]
pub extern "C" fn tempmask_mask_dim(mask: *const AnyMask, axis: usize) -> usize {
    borrow(mask)
        .and_then(|m| m.dims().get(axis).copied())
        .unwrap_or(0)
}

///
/// Number of elements in the mask
///
#[catch_panic(0)]
#[no_mangle]
pub extern "C" fn tempmask_mask_len(mask: *const AnyMask) -> usize {
    borrow(mask).map(|m| m.len()).unwrap_or(0)
}

///
/// Size in bytes of the buffer expected by `tempmask_mask_copy_data()`
///
#[catch_panic(0)]
#[no_mangle]
pub extern "C" fn tempmask_mask_byte_len(mask: *const AnyMask) -> usize {
    borrow(mask).map(|m| m.byte_len()).unwrap_or(0)
}

///
/// Copies the little-endian element values into `buf`, which must hold
/// exactly `tempmask_mask_byte_len()` bytes.
///
#[catch_panic(TEMPMASK_INTERNAL_ERROR)]
#[no_mangle]
pub extern "C" fn tempmask_mask_copy_data(mask: *const AnyMask, buf: *mut u8, len: usize) -> ResultCode {
    let mask = match borrow(mask) {
        Some(mask) => mask,
        None => {
            error!("Invalid parameter: mask is null");
            return TEMPMASK_INVALID_PARAMS;
        }
    };

    if len != mask.byte_len() {
        error!("Invalid parameter: buffer length does not match mask (expected={}, actual={})", mask.byte_len(), len);
        return TEMPMASK_LENGTH_MISMATCH;
    }

    if len > 0 {
        if buf.is_null() {
            error!("Invalid parameter: buf is null");
            return TEMPMASK_INVALID_PARAMS;
        }
        let bytes = match mask.to_le_bytes() {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("Error encoding mask values ({})", e);
                return TEMPMASK_SERIALIZE_ERROR;
            }
        };
        unsafe { ptr::copy_nonoverlapping(bytes.as_ptr(), buf, len) };
    }

    TEMPMASK_SUCCESS
}

///
/// Saves the mask to disk with the given `filename` (see `tempmask_mask_load_raw()`).
///
#[catch_panic(TEMPMASK_INTERNAL_ERROR)]
#[no_mangle]
pub extern "C" fn tempmask_mask_save_raw(mask: *const AnyMask, filename: *const c_char) -> ResultCode {
    let mask = match borrow(mask) {
        Some(mask) => mask,
        None => {
            error!("Invalid parameter: mask is null");
            return TEMPMASK_INVALID_PARAMS;
        }
    };

    let filename_str = match from_cstring(filename) {
        Some(val) => val,
        None => {
            error!("Invalid parameter: filename is invalid");
            return TEMPMASK_INVALID_PARAMS;
        }
    };

    match mask.save(&filename_str) {
        Ok(()) => TEMPMASK_SUCCESS,
        Err(e) => {
            error!("{}", e);
            save_error_code(&e)
        }
    }
}

///
/// Loads a mask previously written by `tempmask_mask_save_raw()`. On success
/// the new handle is written to `out`.
///
#[catch_panic(TEMPMASK_INTERNAL_ERROR)]
#[no_mangle]
pub extern "C" fn tempmask_mask_load_raw(filename: *const c_char, out: *mut *mut AnyMask) -> ResultCode {
    if out.is_null() {
        error!("Invalid parameter: out is null");
        return TEMPMASK_INVALID_PARAMS;
    }

    let filename_str = match from_cstring(filename) {
        Some(val) => val,
        None => {
            error!("Invalid parameter: filename is invalid");
            return TEMPMASK_INVALID_PARAMS;
        }
    };

    match AnyMask::load(&filename_str) {
        Ok(mask) => {
            write_out(out, to_ptr(mask));
            TEMPMASK_SUCCESS
        },
        Err(e) => {
            error!("{}", e);
            load_error_code(&e)
        }
    }
}

///
/// Deallocates a mask handle.
///
#[catch_panic]
#[no_mangle]
pub extern "C" fn tempmask_mask_free(mask: *mut AnyMask) {
    drop(from_ptr_owned(mask));
}
