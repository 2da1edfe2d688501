// src/processing/transcoder/mod.rs

//! Image transcoding via the `image` crate.
//!
//! # Architecture
//!
//! - [`Transcoder`]: Drives the async decode → resample → encode pipeline.
//! - [`resize`]: Downscale-only target dimension math and resampling.
//! - [`formats`]: Per-format encoders.

mod executor;
mod formats;
mod resize;

pub use executor::Transcoder;
pub use formats::encode_as;
pub use resize::target_dimensions;
