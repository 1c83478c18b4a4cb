use tempmask_util::{MaskError, MaskLoadError, MaskSaveError};

pub type ResultCode = u32;

#[no_mangle] pub static TEMPMASK_SUCCESS:                  ResultCode = 0;
#[no_mangle] pub static TEMPMASK_INTERNAL_ERROR:           ResultCode = 1;
#[no_mangle] pub static TEMPMASK_INVALID_PARAMS:           ResultCode = 2;
#[no_mangle] pub static TEMPMASK_SHAPE_ERROR:              ResultCode = 3;
#[no_mangle] pub static TEMPMASK_UNSUPPORTED_TYPE:         ResultCode = 4;
#[no_mangle] pub static TEMPMASK_LENGTH_MISMATCH:          ResultCode = 5;
#[no_mangle] pub static TEMPMASK_READ_ERROR:               ResultCode = 6;
#[no_mangle] pub static TEMPMASK_FILE_DOES_NOT_EXIST:      ResultCode = 7;
#[no_mangle] pub static TEMPMASK_WRITE_ERROR:              ResultCode = 8;
#[no_mangle] pub static TEMPMASK_SERIALIZE_ERROR:          ResultCode = 9;
#[no_mangle] pub static TEMPMASK_DESERIALIZE_ERROR:        ResultCode = 10;
#[no_mangle] pub static TEMPMASK_LOG_ALREADY_CONFIGURED:   ResultCode = 11;

pub fn mask_error_code(e: &MaskError) -> ResultCode {
    match e {
        MaskError::Shape { .. }          => TEMPMASK_SHAPE_ERROR,
        MaskError::LengthMismatch { .. } => TEMPMASK_LENGTH_MISMATCH,
        MaskError::DimsOverflow { .. }   => TEMPMASK_LENGTH_MISMATCH,
        MaskError::UnsupportedType { .. } => TEMPMASK_UNSUPPORTED_TYPE,
        MaskError::Validation { .. }     => TEMPMASK_INVALID_PARAMS,
        MaskError::InternalError { .. }  => TEMPMASK_INTERNAL_ERROR,
    }
}

pub fn load_error_code(e: &MaskLoadError) -> ResultCode {
    match e {
        MaskLoadError::FileNotFound { .. }     => TEMPMASK_FILE_DOES_NOT_EXIST,
        MaskLoadError::ReadError { .. }        => TEMPMASK_READ_ERROR,
        MaskLoadError::DeserializeError { .. } => TEMPMASK_DESERIALIZE_ERROR,
    }
}

pub fn save_error_code(e: &MaskSaveError) -> ResultCode {
    match e {
        MaskSaveError::SerializeError { .. } => TEMPMASK_SERIALIZE_ERROR,
        MaskSaveError::WriteError { .. }     => TEMPMASK_WRITE_ERROR,
    }
}
