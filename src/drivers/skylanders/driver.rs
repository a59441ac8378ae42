use uuid::Uuid;

use super::{
    event::{AxisEvent, AxisInput, BinaryInput, ButtonEvent, Event},
    report::{ControllerState, ReportError},
};

/// Name the pad advertises while pairing
pub const TARGET_NAME: &str = "Skylanders GamePad";

/// GATT characteristic that notifies input report frames
pub const INPUT_CHARACTERISTIC: Uuid = Uuid::from_u128(0x533e1541_3abe_f33f_cd00_594e8b0a8ea3);

/// Skylanders GamePad driver for reading gamepad input. Reduces the pad's
/// notification frames to a stream of state-change events, reporting each
/// control only when its state differs from the previous frame.
pub struct Driver {
    /// Last observed state of the pad, if any frame has arrived yet
    state: Option<ControllerState>,
}

impl Driver {
    pub fn new() -> Self {
        Self { state: None }
    }

    /// Handle one notification frame from the pad.
    ///
    /// Returns an event for every control whose state changed since the
    /// previous frame, terminated by a single [Event::Sync] marker. The very
    /// first frame reports every control. A malformed frame returns an error
    /// and leaves the retained state untouched.
    pub fn handle_frame(&mut self, data: &[u8]) -> Result<Vec<Event>, ReportError> {
        let state = ControllerState::decode(data)?;

        // Update the state
        let old_state = self.update_state(state);

        // Translate the state into a stream of input events
        Ok(self.translate_events(old_state))
    }

    /// Update the retained pad state, returning what it replaced
    fn update_state(&mut self, state: ControllerState) -> Option<ControllerState> {
        self.state.replace(state)
    }

    /// Translate the state transition into individual events. A `None` old
    /// state compares unequal to every control, so nothing gets swallowed on
    /// the first frame even when a control sits at its neutral value.
    fn translate_events(&self, old_state: Option<ControllerState>) -> Vec<Event> {
        let mut events = Vec::new();
        let Some(state) = self.state else {
            return events;
        };

        // Binary events
        if old_state.map(|old| old.dpad_up) != Some(state.dpad_up) {
            events.push(Event::Button(ButtonEvent::DPadUp(BinaryInput {
                pressed: state.dpad_up,
            })));
        }
        if old_state.map(|old| old.dpad_down) != Some(state.dpad_down) {
            events.push(Event::Button(ButtonEvent::DPadDown(BinaryInput {
                pressed: state.dpad_down,
            })));
        }
        if old_state.map(|old| old.dpad_left) != Some(state.dpad_left) {
            events.push(Event::Button(ButtonEvent::DPadLeft(BinaryInput {
                pressed: state.dpad_left,
            })));
        }
        if old_state.map(|old| old.dpad_right) != Some(state.dpad_right) {
            events.push(Event::Button(ButtonEvent::DPadRight(BinaryInput {
                pressed: state.dpad_right,
            })));
        }
        if old_state.map(|old| old.a) != Some(state.a) {
            events.push(Event::Button(ButtonEvent::A(BinaryInput {
                pressed: state.a,
            })));
        }
        if old_state.map(|old| old.b) != Some(state.b) {
            events.push(Event::Button(ButtonEvent::B(BinaryInput {
                pressed: state.b,
            })));
        }
        if old_state.map(|old| old.x) != Some(state.x) {
            events.push(Event::Button(ButtonEvent::X(BinaryInput {
                pressed: state.x,
            })));
        }
        if old_state.map(|old| old.y) != Some(state.y) {
            events.push(Event::Button(ButtonEvent::Y(BinaryInput {
                pressed: state.y,
            })));
        }
        if old_state.map(|old| old.left_shoulder) != Some(state.left_shoulder) {
            events.push(Event::Button(ButtonEvent::LB(BinaryInput {
                pressed: state.left_shoulder,
            })));
        }
        if old_state.map(|old| old.right_shoulder) != Some(state.right_shoulder) {
            events.push(Event::Button(ButtonEvent::RB(BinaryInput {
                pressed: state.right_shoulder,
            })));
        }
        if old_state.map(|old| old.left_trigger) != Some(state.left_trigger) {
            events.push(Event::Button(ButtonEvent::LTDigital(BinaryInput {
                pressed: state.left_trigger,
            })));
        }
        if old_state.map(|old| old.right_trigger) != Some(state.right_trigger) {
            events.push(Event::Button(ButtonEvent::RTDigital(BinaryInput {
                pressed: state.right_trigger,
            })));
        }
        if old_state.map(|old| old.pause) != Some(state.pause) {
            events.push(Event::Button(ButtonEvent::Pause(BinaryInput {
                pressed: state.pause,
            })));
        }

        // Axis events
        if old_state.map(|old| old.right_stick_x) != Some(state.right_stick_x) {
            events.push(Event::Axis(AxisEvent::RStickX(AxisInput {
                value: state.right_stick_x,
            })));
        }
        if old_state.map(|old| old.right_stick_y) != Some(state.right_stick_y) {
            events.push(Event::Axis(AxisEvent::RStickY(AxisInput {
                value: state.right_stick_y,
            })));
        }
        if old_state.map(|old| old.left_stick_x) != Some(state.left_stick_x) {
            events.push(Event::Axis(AxisEvent::LStickX(AxisInput {
                value: state.left_stick_x,
            })));
        }
        if old_state.map(|old| old.left_stick_y) != Some(state.left_stick_y) {
            events.push(Event::Axis(AxisEvent::LStickY(AxisInput {
                value: state.left_stick_y,
            })));
        }

        // One flush marker per frame, whether anything changed or not
        events.push(Event::Sync);

        log::trace!("Got events: {events:?}");

        events
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}
