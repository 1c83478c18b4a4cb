use crate::result_codes::*;
use crate::util::*;
use crate::catch_panic;

use std::ptr;
use std::os::raw::c_char;

use tempmask_util::{FillGapsOptions, RemoveShortOptions, UnionOptions, FusionMode, MaskError};

use log::*;

///
/// Applies `update` to a copy of the options and keeps the result only if it
/// still validates, so a rejected setter leaves the handle untouched.
///
fn set_validated<O: Clone>(
        options: *mut O,
        name: &str,
        validate: fn(&O) -> Result<(), MaskError>,
        update: impl FnOnce(&mut O))
    -> ResultCode {

    let o = match borrow_mut(options) {
        Some(o) => o,
        None => {
            error!("Invalid parameter: {} pointer is null", name);
            return TEMPMASK_INVALID_PARAMS;
        }
    };

    let mut candidate = o.clone();
    update(&mut candidate);
    match validate(&candidate) {
        Ok(()) => {
            *o = candidate;
            TEMPMASK_SUCCESS
        },
        Err(e) => {
            error!("{}", e);
            mask_error_code(&e)
        }
    }
}

///
/// Creates a new `FillGapsOptions` instance initialized to default values
///
#[catch_panic(ptr::null_mut())]
#[no_mangle]
pub extern "C" fn tempmask_fill_gaps_options_new() -> *mut FillGapsOptions {
    to_ptr(FillGapsOptions::default())
}

///
/// Sets the "max_gap_frames" parameter
///
/// Longest inactive span, in frames, between two active segments that will
/// be filled. Zero disables filling. (default `3`)
///
#[catch_panic(TEMPMASK_INTERNAL_ERROR)]
#[no_mangle]
pub extern "C" fn tempmask_fill_gaps_options_set_max_gap_frames(options: *mut FillGapsOptions, value: i64) -> ResultCode {
    set_validated(options, "FillGapsOptions", FillGapsOptions::validate, |o| o.max_gap_frames = value)
}

///
/// Sets the "min_duration" parameter
///
/// Active segments shorter than this are dropped before gaps are measured.
/// (default `2`)
///
#[catch_panic(TEMPMASK_INTERNAL_ERROR)]
#[no_mangle]
pub extern "C" fn tempmask_fill_gaps_options_set_min_duration(options: *mut FillGapsOptions, value: i64) -> ResultCode {
    set_validated(options, "FillGapsOptions", FillGapsOptions::validate, |o| o.min_duration = value)
}

///
/// Sets the "debug_output" parameter (default `false`)
///
#[catch_panic(TEMPMASK_INTERNAL_ERROR)]
#[no_mangle]
pub extern "C" fn tempmask_fill_gaps_options_set_debug_output(options: *mut FillGapsOptions, value: bool) -> ResultCode {
    set_validated(options, "FillGapsOptions", FillGapsOptions::validate, |o| o.debug_output = value)
}

///
/// Logs the `FillGapsOptions` configuration at info level
///
#[catch_panic]
#[no_mangle]
pub extern "C" fn tempmask_fill_gaps_options_log(options: *const FillGapsOptions) {
    match borrow(options) {
        Some(o) => info!("FillGapsOptions {{ max_gap_frames: {}, min_duration: {}, debug_output: {} }}",
            o.max_gap_frames, o.min_duration, o.debug_output),
        None => error!("Invalid parameter: FillGapsOptions pointer is null"),
    }
}

///
/// Deallocates `FillGapsOptions` instance
///
#[catch_panic]
#[no_mangle]
pub extern "C" fn tempmask_fill_gaps_options_free(options: *mut FillGapsOptions) {
    drop(from_ptr_owned(options));
}

///
/// Creates a new `RemoveShortOptions` instance initialized to default values
///
#[catch_panic(ptr::null_mut())]
#[no_mangle]
pub extern "C" fn tempmask_remove_short_options_new() -> *mut RemoveShortOptions {
    to_ptr(RemoveShortOptions::default())
}

///
/// Sets the "min_duration" parameter
///
/// Minimum number of consecutive active frames a position needs to survive.
/// (default `2`)
///
#[catch_panic(TEMPMASK_INTERNAL_ERROR)]
#[no_mangle]
pub extern "C" fn tempmask_remove_short_options_set_min_duration(options: *mut RemoveShortOptions, value: i64) -> ResultCode {
    set_validated(options, "RemoveShortOptions", RemoveShortOptions::validate, |o| o.min_duration = value)
}

///
/// Sets the "min_area_pixels" parameter
///
/// Connected components smaller than this are removed from their frame.
/// Zero disables area pruning. (default `10`)
///
#[catch_panic(TEMPMASK_INTERNAL_ERROR)]
#[no_mangle]
pub extern "C" fn tempmask_remove_short_options_set_min_area_pixels(options: *mut RemoveShortOptions, value: i64) -> ResultCode {
    set_validated(options, "RemoveShortOptions", RemoveShortOptions::validate, |o| o.min_area_pixels = value)
}

///
/// Logs the `RemoveShortOptions` configuration at info level
///
#[catch_panic]
#[no_mangle]
pub extern "C" fn tempmask_remove_short_options_log(options: *const RemoveShortOptions) {
    match borrow(options) {
        Some(o) => info!("RemoveShortOptions {{ min_duration: {}, min_area_pixels: {} }}",
            o.min_duration, o.min_area_pixels),
        None => error!("Invalid parameter: RemoveShortOptions pointer is null"),
    }
}

///
/// Deallocates `RemoveShortOptions` instance
///
#[catch_panic]
#[no_mangle]
pub extern "C" fn tempmask_remove_short_options_free(options: *mut RemoveShortOptions) {
    drop(from_ptr_owned(options));
}

///
/// Creates a new `UnionOptions` instance initialized to default values
///
#[catch_panic(ptr::null_mut())]
#[no_mangle]
pub extern "C" fn tempmask_union_options_new() -> *mut UnionOptions {
    to_ptr(UnionOptions::default())
}

///
/// Sets the "radius" parameter
///
/// Half width of the temporal window; the window spans `2 * radius + 1`
/// frames. (default `2`)
///
#[catch_panic(TEMPMASK_INTERNAL_ERROR)]
#[no_mangle]
pub extern "C" fn tempmask_union_options_set_radius(options: *mut UnionOptions, value: i64) -> ResultCode {
    set_validated(options, "UnionOptions", UnionOptions::validate, |o| o.radius = value)
}

///
/// Sets the "mode" parameter from its name, `"or"` or `"majority"`
/// (case-insensitive). (default `"or"`)
///
#[catch_panic(TEMPMASK_INTERNAL_ERROR)]
#[no_mangle]
pub extern "C" fn tempmask_union_options_set_mode(options: *mut UnionOptions, value: *const c_char) -> ResultCode {
    let mode = match from_cstring(value).map(|s| s.parse::<FusionMode>()) {
        Some(Ok(mode)) => mode,
        Some(Err(e)) => {
            error!("{}", e);
            return TEMPMASK_INVALID_PARAMS;
        },
        None => {
            error!("Invalid parameter: mode is invalid");
            return TEMPMASK_INVALID_PARAMS;
        }
    };
    set_validated(options, "UnionOptions", UnionOptions::validate, |o| o.mode = mode)
}

///
/// Sets the "threshold" parameter
///
/// Active frames required within the window in majority mode. Values above
/// the window size are capped to it. (default `3`)
///
#[catch_panic(TEMPMASK_INTERNAL_ERROR)]
#[no_mangle]
pub extern "C" fn tempmask_union_options_set_threshold(options: *mut UnionOptions, value: i64) -> ResultCode {
    set_validated(options, "UnionOptions", UnionOptions::validate, |o| o.threshold = value)
}

///
/// Logs the `UnionOptions` configuration at info level
///
#[catch_panic]
#[no_mangle]
pub extern "C" fn tempmask_union_options_log(options: *const UnionOptions) {
    match borrow(options) {
        Some(o) => info!("UnionOptions {{ radius: {}, mode: {}, threshold: {} }}",
            o.radius, o.mode, o.threshold),
        None => error!("Invalid parameter: UnionOptions pointer is null"),
    }
}

///
/// Deallocates `UnionOptions` instance
///
#[catch_panic]
#[no_mangle]
pub extern "C" fn tempmask_union_options_free(options: *mut UnionOptions) {
    drop(from_ptr_owned(options));
}
