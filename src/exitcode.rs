//! Standard exit codes (BSD sysexits.h compatible)

/// Data format error (malformed tree description)
pub const DATAERR: i32 = 65;

/// Cannot open input (unknown node label)
pub const NOINPUT: i32 = 66;

/// Internal software error
pub const SOFTWARE: i32 = 70;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
