//! Parameter management types
//!
//! A bounded key/value store with per-parameter flags, and the typed
//! parameter blocks that read their values from it.

pub mod error;
pub mod path;
pub mod storage;

pub use error::ParameterError;
pub use path::PathParams;
pub use storage::{ParamFlags, ParamValue, ParameterStore, MAX_PARAMS, PARAM_NAME_LEN};
