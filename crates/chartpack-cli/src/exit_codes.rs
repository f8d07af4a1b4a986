//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Configuration error - unknown variant, bad property, unreadable project descriptor
pub const CONFIG_ERROR: i32 = 2;

/// IO error - copying, writing or archiving the chart failed
pub const IO_ERROR: i32 = 5;
