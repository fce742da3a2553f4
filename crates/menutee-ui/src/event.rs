use crate::focus::MoveDirection;

/// Semantic input routed to the focused widget.
///
/// The manager turns raw mediator input into these, one per frame at most
/// for each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// Submit pressed while the widget is focused.
    Submit,
    /// Cancel pressed while the widget reports it consumes cancel.
    Cancel,
    /// A new directional input. Widgets that ignore it let focus move.
    Move(MoveDirection),
}

/// Result returned by [`crate::widget::Widget::on_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was handled; focus navigation does not happen.
    Consumed,
    /// Event was not handled; keep routing.
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}
