use packed_struct::prelude::*;
use thiserror::Error;

/// Number of bytes of a notification frame that carry input state. The pad
/// is free to notify more; anything past byte 15 is ignored.
pub const FRAME_SIZE: usize = 16;

/// Byte 9 value that marks the pause button. The pause button shares the
/// byte with the shoulder bits but is reported as the whole byte taking
/// this exact value, not as a bit of its own.
pub const PAUSE_BYTE: u8 = 0x04;

/// Trigger bytes snap to this value while the trigger is held.
pub const TRIGGER_DOWN: u8 = 0xFF;

const SHOULDER_LEFT_MASK: u8 = 0x10;
const SHOULDER_RIGHT_MASK: u8 = 0x20;

/// Possible errors when decoding a notification frame
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("frame is {size} bytes, expected at least {FRAME_SIZE}")]
    InvalidSize { size: usize },
    #[error("failed to unpack frame: {0}")]
    Unpack(#[from] packed_struct::PackingError),
}

/// Skylanders GamePad input report, as notified over the pad's input
/// characteristic.
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "16")]
pub struct PackedInputDataReport {
    // bytes 0-7, purpose unknown
    #[packed_field(bytes = "0..=7")]
    pub unknown: [u8; 8],

    // byte 8
    #[packed_field(bits = "64")]
    pub y: bool,
    #[packed_field(bits = "65")]
    pub x: bool,
    #[packed_field(bits = "66")]
    pub b: bool,
    #[packed_field(bits = "67")]
    pub a: bool,
    #[packed_field(bits = "68")]
    pub dpad_right: bool,
    #[packed_field(bits = "69")]
    pub dpad_left: bool,
    #[packed_field(bits = "70")]
    pub dpad_down: bool,
    #[packed_field(bits = "71")]
    pub dpad_up: bool,

    // byte 9, shoulder bits and the pause marker
    #[packed_field(bytes = "9")]
    pub shoulders: u8,

    // bytes 10-11, digital trigger sensors
    #[packed_field(bytes = "10")]
    pub trigger_l: u8,
    #[packed_field(bytes = "11")]
    pub trigger_r: u8,

    // bytes 12-15
    #[packed_field(bytes = "12")]
    pub joystick_r_x: u8,
    #[packed_field(bytes = "13")]
    pub joystick_r_y: u8,
    #[packed_field(bytes = "14")]
    pub joystick_l_x: u8,
    #[packed_field(bytes = "15")]
    pub joystick_l_y: u8,
}

impl Default for PackedInputDataReport {
    fn default() -> Self {
        Self {
            unknown: [0; 8],
            y: false,
            x: false,
            b: false,
            a: false,
            dpad_right: false,
            dpad_left: false,
            dpad_down: false,
            dpad_up: false,
            shoulders: 0,
            trigger_l: 0,
            trigger_r: 0,
            joystick_r_x: 0,
            joystick_r_y: 0,
            joystick_l_x: 0,
            joystick_l_y: 0,
        }
    }
}

/// Decoded snapshot of every control on the pad. Each field is derived from
/// its own byte region of the frame and never from another field.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct ControllerState {
    pub dpad_up: bool,
    pub dpad_down: bool,
    pub dpad_left: bool,
    pub dpad_right: bool,
    pub a: bool,
    pub b: bool,
    pub x: bool,
    pub y: bool,
    pub left_shoulder: bool,
    pub right_shoulder: bool,
    pub left_trigger: bool,
    pub right_trigger: bool,
    pub pause: bool,
    pub right_stick_x: i8,
    pub right_stick_y: i8,
    pub left_stick_x: i8,
    pub left_stick_y: i8,
}

impl ControllerState {
    /// Decode one raw notification frame into a state snapshot. Frames
    /// shorter than [FRAME_SIZE] bytes are rejected.
    pub fn decode(data: &[u8]) -> Result<Self, ReportError> {
        if data.len() < FRAME_SIZE {
            return Err(ReportError::InvalidSize { size: data.len() });
        }
        let report = PackedInputDataReport::unpack_from_slice(&data[..FRAME_SIZE])?;
        Ok(Self::from(&report))
    }
}

impl From<&PackedInputDataReport> for ControllerState {
    fn from(report: &PackedInputDataReport) -> Self {
        Self {
            dpad_up: report.dpad_up,
            dpad_down: report.dpad_down,
            dpad_left: report.dpad_left,
            dpad_right: report.dpad_right,
            a: report.a,
            b: report.b,
            x: report.x,
            y: report.y,
            left_shoulder: report.shoulders & SHOULDER_LEFT_MASK != 0,
            right_shoulder: report.shoulders & SHOULDER_RIGHT_MASK != 0,
            left_trigger: report.trigger_l == TRIGGER_DOWN,
            right_trigger: report.trigger_r == TRIGGER_DOWN,
            pause: report.shoulders == PAUSE_BYTE,
            right_stick_x: decode_axis(report.joystick_r_x),
            // Both Y axes are reported upside down
            right_stick_y: decode_axis(report.joystick_r_y).saturating_neg(),
            left_stick_x: decode_axis(report.joystick_l_x),
            left_stick_y: decode_axis(report.joystick_l_y).saturating_neg(),
        }
    }
}

/// Decode the pad's unorthodox stick encoding into a signed axis value.
///
/// Deflecting one way counts up 0..=127 from center, but the other way is
/// reported as 255 counting down to 128, so 255 sits just off center and
/// 128 is the far stop. This maps that onto -128..=127 with 0 at center.
pub fn decode_axis(value: u8) -> i8 {
    if value <= 127 {
        value as i8
    } else {
        (value as i16 - 256) as i8
    }
}
