//! Self-play benchmark harness for the Belote agents.

pub mod config;
pub mod harness;
pub mod logging;
