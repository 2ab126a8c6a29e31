//! Utilities shared by the Fusuma binaries and libraries.

pub mod logger;
pub mod time;
