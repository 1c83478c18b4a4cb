use std::ffi::CStr;
use std::os::raw::c_char;

///
/// Borrows a heap value received across the ffi boundary without taking
/// ownership, so it is not dropped when the reference goes out of scope.
/// Returns `None` if the pointer is `null`.
///
pub fn borrow_mut<'a, T>(value: *mut T) -> Option<&'a mut T> {
    unsafe { value.as_mut() }
}

///
/// Shared counterpart of `borrow_mut`
///
pub fn borrow<'a, T>(value: *const T) -> Option<&'a T> {
    unsafe { value.as_ref() }
}

///
/// Takes back ownership of a value previously handed out with `to_ptr`.
/// The value is dropped when the returned box goes out of scope. Returns
/// `None` if the pointer is `null`.
///
pub fn from_ptr_owned<T>(value: *mut T) -> Option<Box<T>> {
    if value.is_null() {
        None
    } else {
        Some(unsafe { Box::from_raw(value) })
    }
}

///
/// Moves an instance to the heap and leaks its pointer so it can be handed
/// across the ffi boundary. Must be released with the matching `*_free`
/// function.
///
pub fn to_ptr<T>(value: T) -> *mut T {
    Box::into_raw(Box::new(value))
}

///
/// Views a caller-owned buffer as a slice. An empty slice is returned for a
/// zero length (the pointer may then be `null`); otherwise `None` if the
/// pointer is `null`.
///
pub fn slice_from_raw<'a, T>(data: *const T, len: usize) -> Option<&'a [T]> {
    if len == 0 {
        Some(&[])
    } else if data.is_null() {
        None
    } else {
        Some(unsafe { std::slice::from_raw_parts(data, len) })
    }
}

///
/// Stores `value` through an out-parameter. Returns `false` if the
/// out-parameter is `null`.
///
pub fn write_out<T>(out: *mut T, value: T) -> bool {
    match borrow_mut(out) {
        Some(slot) => {
            *slot = value;
            true
        }
        None => false,
    }
}

///
/// Copies the contents of a char buffer into an owned `String`
/// instance. Will return `None` if the pointer is `null`, or if
/// the C string is not a valid UTF-8 sequence.
///
pub fn from_cstring(s: *const c_char) -> Option<String> {
    if s.is_null() {
        None
    } else {
        let cstr = unsafe { CStr::from_ptr(s) };
        cstr.to_str().map(String::from).ok()
    }
}
