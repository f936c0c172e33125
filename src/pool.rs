//! Per-request surface accounting.
//!
//! Every intermediate surface a handler creates (fill-blur copies,
//! watermark overlays, round-corner masks) is adopted by the request's
//! `SurfacePool` immediately after creation. Adoption returns a guard that
//! releases the surface exactly once when it goes out of scope, on every
//! exit path, so a handler error can never strand pixel buffers. The
//! pool's counters make the register/release balance observable to tests
//! and metrics.

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::surface::Surface;

/// Arena scope tracking intermediate surfaces for one request.
pub struct SurfacePool {
    registered: AtomicU64,
    released: AtomicU64,
}

impl SurfacePool {
    pub fn new() -> Self {
        SurfacePool {
            registered: AtomicU64::new(0),
            released: AtomicU64::new(0),
        }
    }

    /// Take ownership of an intermediate surface for the rest of its life.
    pub fn adopt(&self, surface: Surface) -> TrackedSurface<'_> {
        self.registered.fetch_add(1, Ordering::Relaxed);
        TrackedSurface {
            surface,
            pool: self,
        }
    }

    /// Surfaces adopted so far.
    pub fn registered(&self) -> u64 {
        self.registered.load(Ordering::Relaxed)
    }

    /// Surfaces released so far.
    pub fn released(&self) -> u64 {
        self.released.load(Ordering::Relaxed)
    }

    /// Adopted surfaces still alive.
    pub fn in_flight(&self) -> u64 {
        self.registered() - self.released()
    }

    /// True when every adopted surface has been released.
    pub fn is_balanced(&self) -> bool {
        self.in_flight() == 0
    }
}

impl Default for SurfacePool {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SurfacePool {
    fn drop(&mut self) {
        // Guards borrow the pool, so by the time the pool drops every one
        // of them is gone and the counters must agree.
        let registered = self.registered();
        let released = self.released();
        debug_assert_eq!(registered, released);
        if registered > 0 {
            tracing::debug!(registered, released, "surface pool scope closed");
        }
    }
}

/// Owning guard for a pooled surface. Derefs to [`Surface`]; dropping it is
/// the release.
pub struct TrackedSurface<'pool> {
    surface: Surface,
    pool: &'pool SurfacePool,
}

impl Deref for TrackedSurface<'_> {
    type Target = Surface;

    fn deref(&self) -> &Surface {
        &self.surface
    }
}

impl DerefMut for TrackedSurface<'_> {
    fn deref_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }
}

impl Drop for TrackedSurface<'_> {
    fn drop(&mut self) {
        self.pool.released.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn small_surface() -> Surface {
        Surface::solid(2, 2, Color::black())
    }

    #[test]
    fn test_adopt_and_release_balance() {
        let pool = SurfacePool::new();
        {
            let _a = pool.adopt(small_surface());
            let _b = pool.adopt(small_surface());
            assert_eq!(pool.registered(), 2);
            assert_eq!(pool.released(), 0);
            assert_eq!(pool.in_flight(), 2);
            assert!(!pool.is_balanced());
        }
        assert_eq!(pool.registered(), 2);
        assert_eq!(pool.released(), 2);
        assert!(pool.is_balanced());
    }

    #[test]
    fn test_release_happens_on_early_return() {
        fn failing(pool: &SurfacePool) -> Result<(), &'static str> {
            let _copy = pool.adopt(small_surface());
            Err("engine failure")
        }

        let pool = SurfacePool::new();
        assert!(failing(&pool).is_err());
        assert_eq!(pool.registered(), 1);
        assert_eq!(pool.released(), 1);
    }

    #[test]
    fn test_guard_allows_mutation() {
        let pool = SurfacePool::new();
        let mut tracked = pool.adopt(small_surface());
        tracked.add_alpha();
        assert!(tracked.has_alpha());
    }

    #[test]
    fn test_empty_pool_is_balanced() {
        let pool = SurfacePool::new();
        assert!(pool.is_balanced());
        assert_eq!(pool.in_flight(), 0);
    }
}
