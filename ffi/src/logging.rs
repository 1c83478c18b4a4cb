use crate::result_codes::*;
use crate::util::*;
use crate::catch_panic;

use std::os::raw::c_char;

use log::LevelFilter;

pub type LogLevel = usize;

#[no_mangle] pub static TEMPMASK_LOG_NONE:  LogLevel = 0;
#[no_mangle] pub static TEMPMASK_LOG_ERROR: LogLevel = 1;
#[no_mangle] pub static TEMPMASK_LOG_WARN:  LogLevel = 2;
#[no_mangle] pub static TEMPMASK_LOG_INFO:  LogLevel = 3;
#[no_mangle] pub static TEMPMASK_LOG_DEBUG: LogLevel = 4;
#[no_mangle] pub static TEMPMASK_LOG_TRACE: LogLevel = 5;

///
/// Configure logging
///
/// Logging can only be configured once per process; subsequent calls fail
/// with `TEMPMASK_LOG_ALREADY_CONFIGURED`.
///
/// Events at or above `stderr_level` go to `stderr`, the remaining events up
/// to `stdout_level` go to `stdout`. With `stdout_level = TEMPMASK_LOG_DEBUG`
/// and `stderr_level = TEMPMASK_LOG_WARN`, debug and info events are written
/// to `stdout` and warnings and errors to `stderr`.
///
/// * `stdout_level`: Threshold of log events that should be written to `stdout`.
/// * `stderr_level`: Threshold of log events that should be written to `stderr`.
/// * `log_file_level`: Threshold of log events that should be written to log file.
/// * `log_file`: Path of the file to receive log events (or null if not applicable).
///
#[catch_panic(TEMPMASK_INTERNAL_ERROR)]
#[no_mangle]
pub extern "C" fn tempmask_log_config(
    stdout_level: LogLevel,
    stderr_level: LogLevel,
    log_file_level: LogLevel,
    log_file: *const c_char
) -> ResultCode {

    let stdout_filter = level_filter(stdout_level);
    let stderr_filter = level_filter(stderr_level);
    let file_filter = level_filter(log_file_level);

    let base_config = fern::Dispatch::new()
        .format(|out, msg, record| {
            let time = chrono::Local::now().format("%H:%M:%S%.3f");
            let level = record.level().to_string().to_lowercase();
            out.finish(format_args!("{} [tempmask][{}][{}] {}", time, level, record.target(), msg));
        });

    let stdout_config = fern::Dispatch::new()
        .filter(move |metadata| metadata.level() > stderr_filter && metadata.level() <= stdout_filter)
        .chain(std::io::stdout());

    let stderr_config = fern::Dispatch::new()
        .level(stderr_filter)
        .chain(std::io::stderr());

    let base_config = match from_cstring(log_file) {
        Some(path) if file_filter != LevelFilter::Off => match fern::log_file(&path) {
            Ok(file) => base_config.chain(
                fern::Dispatch::new()
                    .format(|out, msg, _| {
                        let date = chrono::Local::now().format("%Y-%m-%d");
                        out.finish(format_args!("{} {}", date, msg));
                    })
                    .level(file_filter)
                    .chain(file)),
            Err(_) => return TEMPMASK_WRITE_ERROR
        },
        _ => base_config
    };

    let base_config = base_config
        .chain(stdout_config)
        .chain(stderr_config);

    match base_config.apply() {
        Ok(()) => TEMPMASK_SUCCESS,
        Err(_) => TEMPMASK_LOG_ALREADY_CONFIGURED
    }
}

fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        0 => LevelFilter::Off,
        1 => LevelFilter::Error,
        2 => LevelFilter::Warn,
        3 => LevelFilter::Info,
        4 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
