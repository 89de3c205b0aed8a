use fab_foundation::PointerEvent;
use fab_ui_graphics::{DrawScope, Size};

/// Host-facing surface of a widget.
///
/// The host owns layout, hit testing and dispatch. It calls
/// [`View::on_attached`] once the view enters the hierarchy, routes pointer
/// events that land on it, and redraws it whenever
/// [`View::is_invalidated`] reports pending changes.
pub trait View {
    fn on_attached(&self);

    fn on_pointer_event(&self, event: &PointerEvent);

    /// Records this view's drawing into `scope` and clears the invalidation.
    fn draw(&self, scope: &mut dyn DrawScope);

    fn on_detached(&self);

    fn measured_size(&self) -> Size;

    fn is_invalidated(&self) -> bool;

    fn clear_invalidation(&self);
}
