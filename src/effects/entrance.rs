//! Cards fade in the first time enough of them is on screen.

use super::overlap;
use crate::layout::ElementSpan;
use std::ops::Range;

#[derive(Clone, Debug)]
/// One-shot entrance state for every card.
pub struct Entrance {
    shown: Vec<bool>,
    threshold_percent: usize,
    bottom_margin: usize,
}

impl Entrance {
    #[must_use]
    /// Tracks `count` cards. A card animates in once `threshold_percent` of its rows are within
    /// the visible range shrunk by `bottom_margin` rows.
    pub fn new(count: usize, threshold_percent: usize, bottom_margin: usize) -> Self {
        Self {
            shown: vec![false; count],
            threshold_percent,
            bottom_margin,
        }
    }

    /// Mark cards that have entered the view.
    pub fn observe(&mut self, spans: &[ElementSpan], visible: &Range<usize>) {
        let end = visible.end.saturating_sub(self.bottom_margin).max(visible.start);
        let root = visible.start..end;
        for (index, (shown, span)) in self.shown.iter_mut().zip(spans).enumerate() {
            if *shown || span.height == 0 {
                continue;
            }
            let rows = overlap(*span, &root);
            if rows > 0 && rows * 100 >= span.height * self.threshold_percent {
                *shown = true;
                tracing::trace!("card {index} animated in");
            }
        }
    }

    #[must_use]
    /// Whether a card has played its entrance.
    pub fn is_shown(&self, card: usize) -> bool {
        self.shown.get(card).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bottom_margin_delays_entrance() {
        let spans = [ElementSpan { top: 9, height: 1 }];
        let mut entrance = Entrance::new(1, 10, 2);
        entrance.observe(&spans, &(0..10));
        assert!(!entrance.is_shown(0));
        entrance.observe(&spans, &(2..12));
        assert!(entrance.is_shown(0));
    }

    #[test]
    fn threshold_is_a_share_of_the_card() {
        let spans = [ElementSpan { top: 10, height: 20 }];
        let mut entrance = Entrance::new(1, 10, 0);
        entrance.observe(&spans, &(0..11));
        assert!(!entrance.is_shown(0), "1 of 20 rows is below 10%");
        entrance.observe(&spans, &(0..12));
        assert!(entrance.is_shown(0));
        entrance.observe(&spans, &(100..120));
        assert!(entrance.is_shown(0), "entrance is not reversed");
    }
}
