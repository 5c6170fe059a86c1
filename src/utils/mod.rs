// Shared helpers

pub mod format;
pub mod storage;

pub use format::*;
pub use storage::*;
