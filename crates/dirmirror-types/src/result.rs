//! Result type alias for dirmirror operations

use crate::Error;

/// Result type alias for dirmirror operations
pub type Result<T> = std::result::Result<T, Error>;
