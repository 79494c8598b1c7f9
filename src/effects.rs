//! Visual effects that react to clicks, keys and the visible rows.
//!
//! None of these carry invariants beyond "apply this effect when this happens". Visibility-driven
//! effects are fed the viewport's visible row range after every change and are one-shot per
//! element.

pub mod entrance;
pub mod lazy_load;
pub mod lightbox;
pub mod parallax;
pub mod splash;

use crate::layout::ElementSpan;
use std::ops::Range;

#[must_use]
/// Number of rows of `span` that fall inside `visible`.
pub fn overlap(span: ElementSpan, visible: &Range<usize>) -> usize {
    let start = span.top.max(visible.start);
    let end = (span.top + span.height).min(visible.end);
    end.saturating_sub(start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_counts_shared_rows() {
        let span = ElementSpan { top: 10, height: 4 };
        assert_eq!(overlap(span, &(0..10)), 0);
        assert_eq!(overlap(span, &(0..12)), 2);
        assert_eq!(overlap(span, &(11..30)), 3);
        assert_eq!(overlap(span, &(14..30)), 0);
    }
}
