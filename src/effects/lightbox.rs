//! Full-screen overlay showing one image.

#[derive(Clone, Debug, Default)]
/// Overlay state: closed, or open on an image.
pub struct Lightbox {
    open: Option<usize>,
}

impl Lightbox {
    /// Show the overlay for an image.
    pub fn open(&mut self, image: usize) {
        tracing::debug!("lightbox opened on image {image}");
        self.open = Some(image);
    }

    /// Hide the overlay. Closing a closed lightbox does nothing.
    pub fn close(&mut self) {
        if self.open.take().is_some() {
            tracing::debug!("lightbox closed");
        }
    }

    #[must_use]
    /// Whether the overlay is showing.
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    #[must_use]
    /// Image shown in the overlay.
    pub fn image(&self) -> Option<usize> {
        self.open
    }
}
