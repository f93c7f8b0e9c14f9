use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components receive data via props (struct fields), may borrow persistent
/// presentation state from `TuiState`, and render to a `Frame` within a
/// given `Rect`.
///
/// `render` takes `&mut self` so components can update that borrowed state
/// during the render pass (selection clamping, page sizes, scroll offsets).
/// This aligns with Ratatui's `StatefulWidget` pattern.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
