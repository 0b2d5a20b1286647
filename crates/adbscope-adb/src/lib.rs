//! Android Debug Bridge client for adbscope
//!
//! This crate wraps the `adb` executable: connecting to a device,
//! restarting adbd as root, and building the logcat command.

mod client;
mod error;

pub use client::{AdbClient, CommandOutcome};
pub use error::AdbError;
