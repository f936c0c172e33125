// Constants module - centralized default values for configuration
//
// This module defines all default values used throughout the codebase.
// Using constants instead of magic numbers improves maintainability
// and makes it easier to understand and modify defaults.

// =============================================================================
// Processor defaults
// =============================================================================

/// Default maximum watermark fit width when no ratio args are given.
///
/// Matches the dimension cap common to raster engines (2^14 - 1).
pub const DEFAULT_MAX_WIDTH: u32 = 16383;

/// Default maximum watermark fit height when no ratio args are given.
pub const DEFAULT_MAX_HEIGHT: u32 = 16383;

/// Default cap on directives per request (0 = unlimited).
pub const DEFAULT_MAX_FILTER_OPS: usize = 0;

// =============================================================================
// Composition defaults
// =============================================================================

/// Gaussian sigma applied to the stretched backdrop in blurred-background fill.
pub const FILL_BLUR_SIGMA: f64 = 50.0;

/// Upper bound on either dimension of a rasterized vector mask.
pub const MAX_MASK_DIMENSION: u32 = 16383;
