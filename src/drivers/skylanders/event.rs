/// Events that can be emitted by the pad
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Button(ButtonEvent),
    Axis(AxisEvent),
    /// End of one frame's worth of changes; consumers should flush.
    Sync,
}

/// [BinaryInput] contains either pressed or unpressed
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BinaryInput {
    pub pressed: bool,
}

/// Button events represent binary inputs
#[derive(Clone, Debug, PartialEq)]
pub enum ButtonEvent {
    /// DPad up
    DPadUp(BinaryInput),
    /// DPad down
    DPadDown(BinaryInput),
    /// DPad left
    DPadLeft(BinaryInput),
    /// DPad right
    DPadRight(BinaryInput),
    /// A Button
    A(BinaryInput),
    /// B Button
    B(BinaryInput),
    /// X Button
    X(BinaryInput),
    /// Y Button
    Y(BinaryInput),
    /// Left shoulder button
    LB(BinaryInput),
    /// Right shoulder button
    RB(BinaryInput),
    // Digital trigger left; the pad has no analog travel to report
    LTDigital(BinaryInput),
    // Digital trigger right
    RTDigital(BinaryInput),
    /// Pause button in the center of the pad
    Pause(BinaryInput),
}

/// [AxisInput] is a single signed stick axis, centered at 0
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisInput {
    pub value: i8,
}

/// Axis events carry one stick axis in the absolute domain
#[derive(Clone, Debug, PartialEq)]
pub enum AxisEvent {
    LStickX(AxisInput),
    LStickY(AxisInput),
    RStickX(AxisInput),
    RStickY(AxisInput),
}
