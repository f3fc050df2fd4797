//! Interaction state tracking for previewed components.
//!
//! Pointer and focus events flip the transient flags; `filled`, `error` and
//! `disabled` are set from data. [`InteractionState::active_states`] turns the
//! flags into the ordered state list the overlay resolver merges.

use crate::models::StateName;

/// Input events that change a component's interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionEvent {
    /// Pointer moved over the element
    PointerEnter,
    /// Pointer left the element
    PointerLeave,
    /// Pointer pressed on the element
    PointerDown,
    /// Pointer released
    PointerUp,
    /// Element gained focus
    Focus,
    /// Element lost focus
    Blur,
    /// Element gained or lost a value
    SetFilled(bool),
    /// Element entered or left a validation error
    SetError(bool),
    /// Element was enabled or disabled
    SetDisabled(bool),
}

/// Interaction flags of one component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionState {
    hovered: bool,
    pressed: bool,
    focused: bool,
    filled: bool,
    error: bool,
    disabled: bool,
}

impl InteractionState {
    /// Creates a resting state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one event.
    ///
    /// While disabled, pointer and focus events are ignored. Disabling clears
    /// the transient pointer and focus flags.
    pub fn apply(&mut self, event: InteractionEvent) {
        match event {
            InteractionEvent::SetDisabled(disabled) => {
                self.disabled = disabled;
                if disabled {
                    self.hovered = false;
                    self.pressed = false;
                    self.focused = false;
                }
            }
            InteractionEvent::SetFilled(filled) => self.filled = filled,
            InteractionEvent::SetError(error) => self.error = error,
            _ if self.disabled => {}
            InteractionEvent::PointerEnter => self.hovered = true,
            InteractionEvent::PointerLeave => {
                self.hovered = false;
                self.pressed = false;
            }
            InteractionEvent::PointerDown => self.pressed = self.hovered,
            InteractionEvent::PointerUp => self.pressed = false,
            InteractionEvent::Focus => self.focused = true,
            InteractionEvent::Blur => self.focused = false,
        }
    }

    /// Applies a sequence of events and returns the result.
    #[must_use]
    pub fn with_events(mut self, events: impl IntoIterator<Item = InteractionEvent>) -> Self {
        for event in events {
            self.apply(event);
        }
        self
    }

    /// Returns true while disabled.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Returns the states to merge, in canonical order.
    ///
    /// `default` always comes first. A disabled element yields only
    /// `[default, disabled]`.
    #[must_use]
    pub fn active_states(&self) -> Vec<StateName> {
        if self.disabled {
            return vec![StateName::Default, StateName::Disabled];
        }

        [
            (true, StateName::Default),
            (self.hovered, StateName::Hover),
            (self.pressed, StateName::Active),
            (self.focused, StateName::Focus),
            (self.filled, StateName::Filled),
            (self.error, StateName::Error),
        ]
        .into_iter()
        .filter_map(|(on, state)| on.then_some(state))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use InteractionEvent::*;

    #[test]
    fn test_resting_state_is_default_only() {
        assert_eq!(InteractionState::new().active_states(), vec![StateName::Default]);
    }

    #[test]
    fn test_press_requires_hover() {
        let state = InteractionState::new().with_events([PointerDown]);
        assert_eq!(state.active_states(), vec![StateName::Default]);

        let state = InteractionState::new().with_events([PointerEnter, PointerDown]);
        assert_eq!(
            state.active_states(),
            vec![StateName::Default, StateName::Hover, StateName::Active]
        );

        let state = state.with_events([PointerLeave]);
        assert_eq!(state.active_states(), vec![StateName::Default]);
    }

    #[test]
    fn test_canonical_order_regardless_of_event_order() {
        let state = InteractionState::new().with_events([
            SetError(true),
            Focus,
            SetFilled(true),
            PointerEnter,
        ]);
        assert_eq!(
            state.active_states(),
            vec![
                StateName::Default,
                StateName::Hover,
                StateName::Focus,
                StateName::Filled,
                StateName::Error
            ]
        );
    }

    #[test]
    fn test_disabled_is_exclusive_until_cleared() {
        let mut state = InteractionState::new().with_events([PointerEnter, Focus, SetDisabled(true)]);
        assert_eq!(state.active_states(), vec![StateName::Default, StateName::Disabled]);

        state.apply(PointerEnter);
        state.apply(SetFilled(true));
        assert_eq!(state.active_states(), vec![StateName::Default, StateName::Disabled]);

        state.apply(SetDisabled(false));
        assert_eq!(state.active_states(), vec![StateName::Default, StateName::Filled]);
    }
}
