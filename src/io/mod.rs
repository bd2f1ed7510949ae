//! File export for session data.

pub mod export;
