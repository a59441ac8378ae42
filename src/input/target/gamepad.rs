//! Virtual gamepad mirroring the pad's controls through uinput.
use std::error::Error;

use evdev::{
    uinput::{VirtualDevice, VirtualDeviceBuilder},
    AbsInfo, AbsoluteAxisCode, AttributeSet, EventType, InputEvent, KeyCode, SynchronizationCode,
    SynchronizationEvent, UinputAbsSetup,
};

use crate::drivers::skylanders::event::{AxisEvent, ButtonEvent, Event};

/// Name given to the virtual device node
pub const DEVICE_NAME: &str = "Skylanders GamePad";

#[derive(Debug)]
pub struct VirtualGamepad {
    device: VirtualDevice,
}

impl VirtualGamepad {
    /// Create the virtual gamepad. The kernel removes the device again when
    /// this handle is dropped.
    pub fn new() -> Result<Self, Box<dyn Error + Send + Sync>> {
        log::debug!("Creating virtual gamepad");
        let mut device = Self::create_virtual_device()?;
        for path in device.enumerate_dev_nodes_blocking()? {
            let path = path?;
            log::info!("Virtual gamepad created at {}", path.display());
        }
        Ok(Self { device })
    }

    /// Write one frame's worth of driver events to the device
    pub fn write_events(&mut self, events: &[Event]) -> Result<(), Box<dyn Error + Send + Sync>> {
        let input_events: Vec<InputEvent> = events.iter().map(Self::translate_event).collect();
        self.device.emit(input_events.as_slice())?;
        Ok(())
    }

    /// Translate the given driver event into an evdev event
    fn translate_event(event: &Event) -> InputEvent {
        match event {
            Event::Button(button) => {
                let (code, input) = match button {
                    ButtonEvent::DPadUp(input) => (KeyCode::BTN_DPAD_UP, input),
                    ButtonEvent::DPadDown(input) => (KeyCode::BTN_DPAD_DOWN, input),
                    ButtonEvent::DPadLeft(input) => (KeyCode::BTN_DPAD_LEFT, input),
                    ButtonEvent::DPadRight(input) => (KeyCode::BTN_DPAD_RIGHT, input),
                    ButtonEvent::A(input) => (KeyCode::BTN_SOUTH, input),
                    ButtonEvent::B(input) => (KeyCode::BTN_EAST, input),
                    ButtonEvent::X(input) => (KeyCode::BTN_NORTH, input),
                    ButtonEvent::Y(input) => (KeyCode::BTN_WEST, input),
                    ButtonEvent::LB(input) => (KeyCode::BTN_TL, input),
                    ButtonEvent::RB(input) => (KeyCode::BTN_TR, input),
                    ButtonEvent::LTDigital(input) => (KeyCode::BTN_TL2, input),
                    ButtonEvent::RTDigital(input) => (KeyCode::BTN_TR2, input),
                    ButtonEvent::Pause(input) => (KeyCode::BTN_START, input),
                };
                InputEvent::new(EventType::KEY.0, code.0, input.pressed as i32)
            }
            Event::Axis(axis) => {
                let (code, input) = match axis {
                    AxisEvent::LStickX(input) => (AbsoluteAxisCode::ABS_X, input),
                    AxisEvent::LStickY(input) => (AbsoluteAxisCode::ABS_Y, input),
                    AxisEvent::RStickX(input) => (AbsoluteAxisCode::ABS_RX, input),
                    AxisEvent::RStickY(input) => (AbsoluteAxisCode::ABS_RY, input),
                };
                InputEvent::new(EventType::ABSOLUTE.0, code.0, input.value as i32)
            }
            Event::Sync => SynchronizationEvent::new(SynchronizationCode::SYN_REPORT, 0).into(),
        }
    }

    /// Create the virtual device to emulate
    fn create_virtual_device() -> Result<VirtualDevice, Box<dyn Error + Send + Sync>> {
        // Setup Key inputs
        let mut keys = AttributeSet::<KeyCode>::new();
        keys.insert(KeyCode::BTN_SOUTH);
        keys.insert(KeyCode::BTN_EAST);
        keys.insert(KeyCode::BTN_NORTH);
        keys.insert(KeyCode::BTN_WEST);
        keys.insert(KeyCode::BTN_TL);
        keys.insert(KeyCode::BTN_TR);
        keys.insert(KeyCode::BTN_TL2);
        keys.insert(KeyCode::BTN_TR2);
        keys.insert(KeyCode::BTN_DPAD_UP);
        keys.insert(KeyCode::BTN_DPAD_DOWN);
        keys.insert(KeyCode::BTN_DPAD_LEFT);
        keys.insert(KeyCode::BTN_DPAD_RIGHT);
        keys.insert(KeyCode::BTN_START);
        // The pause button may grow an alternate select fingering; register
        // the key now so the device does not need to change shape later.
        keys.insert(KeyCode::BTN_SELECT);

        // Setup ABS inputs
        let stick_setup = AbsInfo::new(0, -128, 127, 0, 0, 0);
        let abs_x = UinputAbsSetup::new(AbsoluteAxisCode::ABS_X, stick_setup);
        let abs_y = UinputAbsSetup::new(AbsoluteAxisCode::ABS_Y, stick_setup);
        let abs_rx = UinputAbsSetup::new(AbsoluteAxisCode::ABS_RX, stick_setup);
        let abs_ry = UinputAbsSetup::new(AbsoluteAxisCode::ABS_RY, stick_setup);

        // Build the device
        let device = VirtualDeviceBuilder::new()?
            .name(DEVICE_NAME)
            .with_keys(&keys)?
            .with_absolute_axis(&abs_x)?
            .with_absolute_axis(&abs_y)?
            .with_absolute_axis(&abs_rx)?
            .with_absolute_axis(&abs_ry)?
            .build()?;

        Ok(device)
    }
}
