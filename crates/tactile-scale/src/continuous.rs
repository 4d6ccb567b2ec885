use std::fmt::Debug;

/// An invertible mapping between a domain and a pixel range.
///
/// Implementations are immutable values: `solve_domain` returns a new scale
/// and equality is used to skip no-op updates.
pub trait ContinuousScale: Clone + PartialEq + Debug {
    /// Data type of the domain. Gestures only carry these values around and
    /// hand them back to the scale, so no arithmetic is required of them.
    type Domain: Clone + Debug;

    /// Maps a domain value to its range position.
    fn apply(&self, value: &Self::Domain) -> f64;

    /// Maps a range position back to the domain.
    fn inverse(&self, value: f64) -> Self::Domain;

    /// The `(start, end)` range; `start > end` for flipped axes.
    fn range(&self) -> (f64, f64);

    /// Returns a scale with the same range whose domain maps `first.0` to
    /// `first.1` and, when given, `second.0` to `second.1`.
    ///
    /// With a single point the scale is translated and keeps its zoom.
    fn solve_domain(
        &self,
        first: (&Self::Domain, f64),
        second: Option<(&Self::Domain, f64)>,
    ) -> Self;

    fn is_range_ascending(&self) -> bool {
        let (start, end) = self.range();
        start <= end
    }
}
