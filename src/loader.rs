//! Auxiliary image loading.
//!
//! Filters that composite a second image (watermark) receive their pixel
//! data through this trait. The pipeline never fetches anything itself;
//! the embedding service decides whether a reference means an object-store
//! key, an HTTP URL, or a test fixture. Blobs are encoded image bytes;
//! decoding happens in the raster engine (`Surface::from_blob`).

use bytes::Bytes;

use crate::error::FilterError;

/// Resolves an image reference to its encoded bytes.
///
/// References arrive URL-decoded. Errors abort the directive chain; loader
/// failures are never swallowed.
pub trait ImageLoader {
    fn load(&self, reference: &str) -> Result<Bytes, FilterError>;
}

/// Any `Fn(&str) -> Result<Bytes, FilterError>` is a loader, so services can
/// pass closures over their own fetch stacks without a newtype.
impl<F> ImageLoader for F
where
    F: Fn(&str) -> Result<Bytes, FilterError>,
{
    fn load(&self, reference: &str) -> Result<Bytes, FilterError> {
        self(reference)
    }
}

/// Loader over a fixed reference → blob table. Unknown references fail.
#[derive(Debug, Clone, Default)]
pub struct StaticLoader {
    entries: Vec<(String, Bytes)>,
}

impl StaticLoader {
    pub fn new() -> Self {
        StaticLoader {
            entries: Vec::new(),
        }
    }

    pub fn with(mut self, reference: impl Into<String>, blob: impl Into<Bytes>) -> Self {
        self.entries.push((reference.into(), blob.into()));
        self
    }
}

impl ImageLoader for StaticLoader {
    fn load(&self, reference: &str) -> Result<Bytes, FilterError> {
        self.entries
            .iter()
            .find(|(name, _)| name == reference)
            .map(|(_, blob)| blob.clone())
            .ok_or_else(|| FilterError::loader(reference, "no such entry"))
    }
}
