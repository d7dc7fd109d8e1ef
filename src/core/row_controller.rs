use crate::core::Span;

/// Vertical row geometry supplied by the host view.
///
/// The grid never lays out rows itself; it asks the controller where each
/// row sits when drawing separators and the no-information area.
pub trait RowController {
    /// Total height of all rows, excluding the header.
    fn total_height(&self) -> f64;

    fn row_count(&self) -> usize;

    /// Vertical span of `row`, or `None` when the row is hidden or unknown.
    fn row_geometry(&self, row: usize) -> Option<Span>;

    /// Row covering the vertical scene coordinate `y`.
    fn index_at(&self, y: f64) -> Option<usize>;
}
