//! Audio backend: one decoder/sink per track.
//!
//! The controller only talks to the `AudioBackend` trait; `RodioBackend`
//! is the implementation used at runtime.

mod backend;
mod rodio_backend;
mod sink;

#[cfg(test)]
pub(crate) mod fake;

pub use backend::{AudioBackend, BackendError};
pub use rodio_backend::RodioBackend;
