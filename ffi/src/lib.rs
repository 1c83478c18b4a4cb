extern crate tempmask_util;
extern crate tempmask_ffi_macros;

mod util;
mod result_codes;
mod options;
mod mask;
mod logging;

pub use util::*;
pub use result_codes::*;
pub use options::*;
pub use mask::*;
pub use logging::tempmask_log_config;

use tempmask_util::{AnyMask, MaskError};
use tempmask_util::{FillGapsOptions, RemoveShortOptions, UnionOptions};

use tempmask_ffi_macros::catch_panic;

use log::error;

///
/// Borrows the input handle and options (falling back to defaults when the
/// options pointer is null), runs `op` and hands the result back through
/// `out`.
///
fn run_operation<O: Default>(
        name: &str,
        mask: *const AnyMask,
        options: *const O,
        out: *mut *mut AnyMask,
        op: fn(&AnyMask, &O) -> Result<AnyMask, MaskError>)
    -> ResultCode {

    let mask = match borrow(mask) {
        Some(mask) => mask,
        None => {
            error!("Invalid parameter: mask is null ({})", name);
            return TEMPMASK_INVALID_PARAMS;
        }
    };

    if out.is_null() {
        error!("Invalid parameter: out is null ({})", name);
        return TEMPMASK_INVALID_PARAMS;
    }

    let dflt_opts = O::default();
    let options = borrow(options).unwrap_or(&dflt_opts);

    match op(mask, options) {
        Ok(result) => {
            write_out(out, to_ptr(result));
            TEMPMASK_SUCCESS
        },
        Err(e) => {
            error!("{} failed: {}", name, e);
            mask_error_code(&e)
        }
    }
}

///
/// Fills short temporal gaps in every pixel track.
///
/// * `mask`: Input mask handle of rank 2, 3 or 4. It is not modified.
///
/// * `options`: See `FillGapsOptions`; null selects the defaults.
///
/// * `out`: Receives a new handle with the same kind and dims as the input.
///    Release it with `tempmask_mask_free()`.
///
#[catch_panic(TEMPMASK_INTERNAL_ERROR)]
#[no_mangle]
pub extern "C" fn tempmask_fill_gaps(
        mask: *const AnyMask,
        options: *const FillGapsOptions,
        out: *mut *mut AnyMask)
    -> ResultCode {
    run_operation("fill_gaps", mask, options, out, AnyMask::fill_gaps)
}

///
/// Removes objects that are too small in space or too short in time.
///
/// Each frame first drops 8-connected components below `min_area_pixels`,
/// then positions active for fewer than `min_duration` consecutive frames are
/// cleared. The result holds 0/1 values in the input representation.
///
#[catch_panic(TEMPMASK_INTERNAL_ERROR)]
#[no_mangle]
pub extern "C" fn tempmask_remove_short_objects(
        mask: *const AnyMask,
        options: *const RemoveShortOptions,
        out: *mut *mut AnyMask)
    -> ResultCode {
    run_operation("remove_short_objects", mask, options, out, AnyMask::remove_short_objects)
}

///
/// Fuses every pixel track over a sliding temporal window, either as a plain
/// union (`or`) or as a majority vote. The result holds 0/1 values in the
/// input representation.
///
#[catch_panic(TEMPMASK_INTERNAL_ERROR)]
#[no_mangle]
pub extern "C" fn tempmask_union(
        mask: *const AnyMask,
        options: *const UnionOptions,
        out: *mut *mut AnyMask)
    -> ResultCode {
    run_operation("union", mask, options, out, AnyMask::temporal_union)
}
