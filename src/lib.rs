// Rasterpipe Image Filter Pipeline Library
// Directive dispatch, color/geometry resolution, and raster composition

pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod filters;
pub mod geometry;
pub mod loader;
pub mod metrics;
pub mod pool;
pub mod processor;
pub mod surface;
