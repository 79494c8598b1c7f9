//! Images show a placeholder until they first scroll into view.

use super::overlap;
use crate::layout::ElementSpan;
use std::ops::Range;

#[derive(Clone, Debug, Default)]
/// Per-image loaded flags.
pub struct LazyImages {
    loaded: Vec<bool>,
}

impl LazyImages {
    #[must_use]
    /// Tracks `count` images, all starting as placeholders.
    pub fn new(count: usize) -> Self {
        Self {
            loaded: vec![false; count],
        }
    }

    /// Load every image with at least one row in `visible`.
    ///
    /// Returns how many images loaded on this call.
    pub fn reveal(&mut self, spans: &[ElementSpan], visible: &Range<usize>) -> usize {
        let mut newly = 0;
        for (index, (loaded, span)) in self.loaded.iter_mut().zip(spans).enumerate() {
            if !*loaded && overlap(*span, visible) > 0 {
                *loaded = true;
                newly += 1;
                tracing::trace!("image {index} loaded");
            }
        }
        newly
    }

    #[must_use]
    /// Whether an image has swapped in its real source.
    pub fn is_loaded(&self, image: usize) -> bool {
        self.loaded.get(image).copied().unwrap_or(false)
    }
}
