#![deny(unsafe_code)]
//! Koi compositing for koi-engine.
//!
//! [`Compositor`] colorizes cached masks in parallel and stacks them in a
//! fixed order; [`KoiEngine`] ties asset loading, cache warming, attribute
//! generation and rendering together behind one shareable handle. PNG
//! encoding lives in [`snapshot`] for callers that serve or save images.

pub mod colorize;
pub mod compositor;
pub mod engine;
pub mod snapshot;

#[cfg(test)]
mod test_support;

pub use colorize::{colorize, ALPHA_THRESHOLD};
pub use compositor::Compositor;
pub use engine::KoiEngine;
pub use snapshot::{encode_png, write_png};
