//! Integration test crate for VEdit.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on every vedit crate to verify they work together.

#[cfg(test)]
mod timeline;

#[cfg(test)]
mod session;

#[cfg(test)]
mod playback;
