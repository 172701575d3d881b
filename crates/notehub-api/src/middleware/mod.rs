//! Tower middleware: session validation, permission evaluation, request
//! logging.

pub mod logging;
pub mod permission;
pub mod session;
