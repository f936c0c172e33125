//! Request-scoped filter execution.
//!
//! A [`FilterProcessor`] owns the configuration and metrics shared across
//! requests. Each [`FilterProcessor::apply`] call opens a fresh surface
//! pool, walks the directive list in order against one mutable surface,
//! and records pool accounting whether the chain succeeds or aborts.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::ProcessorConfig;
use crate::error::FilterError;
use crate::filters::{self, FilterDirective, Parsed};
use crate::loader::ImageLoader;
use crate::metrics::FilterMetrics;
use crate::pool::SurfacePool;
use crate::surface::Surface;

/// Cooperative cancellation signal, checked between directives.
///
/// Cloning shares the underlying flag, so the enclosing request handler
/// can keep one half and hand the other to the filter chain.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Executes filter directive chains against raster surfaces.
pub struct FilterProcessor {
    config: ProcessorConfig,
    metrics: Arc<FilterMetrics>,
}

impl FilterProcessor {
    pub fn new(config: ProcessorConfig) -> FilterProcessor {
        FilterProcessor {
            config,
            metrics: Arc::new(FilterMetrics::new()),
        }
    }

    /// Build a processor that reports into an existing metrics registry.
    pub fn with_metrics(config: ProcessorConfig, metrics: Arc<FilterMetrics>) -> FilterProcessor {
        FilterProcessor { config, metrics }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    pub fn metrics(&self) -> &FilterMetrics {
        &self.metrics
    }

    /// Run a directive chain in order against `surface`.
    ///
    /// Directives observe each other's effects; the first handler error
    /// aborts the rest of the chain. Unknown and administratively disabled
    /// names are skipped and counted, never failed. Intermediate surfaces
    /// live in a pool scoped to this call, so they are released on every
    /// exit path.
    pub fn apply(
        &self,
        surface: &mut Surface,
        loader: &dyn ImageLoader,
        directives: &[FilterDirective],
        cancel: &CancelToken,
    ) -> Result<(), FilterError> {
        let max_ops = self.config.max_filter_ops;
        if max_ops > 0 && directives.len() > max_ops {
            return Err(FilterError::TooManyFilters {
                count: directives.len(),
                max: max_ops,
            });
        }

        let pool = SurfacePool::new();
        let result = self.run(surface, loader, directives, cancel, &pool);
        self.metrics
            .record_pool_scope(pool.registered(), pool.released());
        result
    }

    fn run(
        &self,
        surface: &mut Surface,
        loader: &dyn ImageLoader,
        directives: &[FilterDirective],
        cancel: &CancelToken,
        pool: &SurfacePool,
    ) -> Result<(), FilterError> {
        for directive in directives {
            if cancel.is_cancelled() {
                return Err(FilterError::Cancelled);
            }
            if self.config.is_disabled(&directive.name) {
                self.metrics.increment_skipped(&directive.name);
                tracing::debug!(filter = %directive.name, "Skipping disabled filter");
                continue;
            }
            match filters::parse(directive) {
                Parsed::Unknown => {
                    self.metrics.increment_skipped(&directive.name);
                    tracing::debug!(filter = %directive.name, "Skipping unknown filter");
                }
                Parsed::Noop => {
                    self.metrics.increment_noop();
                }
                Parsed::Op(op) => {
                    if let Err(e) = filters::apply(&op, surface, loader, pool, &self.config) {
                        self.metrics.increment_failed();
                        tracing::warn!(
                            filter = %directive.name,
                            error = %e,
                            "Filter failed, aborting chain"
                        );
                        return Err(e);
                    }
                    self.metrics.increment_applied();
                }
            }
        }
        Ok(())
    }

    /// Pad `surface` out to `(target_w, target_h)` with a flat color or a
    /// blurred self-backdrop; see the fill filter module. Runs in its own
    /// pool scope, exactly like a directive chain.
    #[allow(clippy::too_many_arguments)]
    pub fn fill(
        &self,
        surface: &mut Surface,
        target_w: u32,
        target_h: u32,
        h_pad: u32,
        v_pad: u32,
        upscale: bool,
        color_token: &str,
    ) -> Result<(), FilterError> {
        let pool = SurfacePool::new();
        let result = filters::fill::fill(
            surface,
            &pool,
            target_w,
            target_h,
            h_pad,
            v_pad,
            upscale,
            color_token,
            self.config.disable_blur,
        );
        self.metrics
            .record_pool_scope(pool.registered(), pool.released());
        result
    }
}

impl Default for FilterProcessor {
    fn default() -> Self {
        FilterProcessor::new(ProcessorConfig::default())
    }
}
