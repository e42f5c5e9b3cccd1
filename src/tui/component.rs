use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components receive data via props (struct fields), may borrow persistent
/// presentation state (e.g. `&mut TableState`), and render to a `Frame`
/// within a given `Rect`.
///
/// # Mutability
///
/// The `render` method takes `&mut self` so components can update the
/// presentation state they borrow (scroll offsets, selection) during the
/// render pass. This aligns with Ratatui's `StatefulWidget` pattern.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
