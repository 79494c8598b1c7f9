//! Decorative glyphs drift against the scroll direction.

#[must_use]
/// Vertical shift for decorative elements at `scroll_y`.
///
/// Elements move up by `per_mille / 1000` of the scroll offset.
pub fn offset(scroll_y: f64, per_mille: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let rate = per_mille as f64 / 1000.0;
    -(scroll_y * rate)
}

#[cfg(test)]
mod tests {
    use super::offset;

    #[test]
    fn default_rate_matches_half_of_a_tenth() {
        assert!((offset(200.0, 50) + 10.0).abs() < 1e-9);
        assert!(offset(0.0, 50).abs() < 1e-9);
    }
}
