use std::error::Error;

use crate::drivers::skylanders::{
    driver::Driver,
    event::{AxisEvent, AxisInput, BinaryInput, ButtonEvent, Event},
    report::{ReportError, FRAME_SIZE},
};

/// Number of controls on the pad: thirteen buttons and four stick axes
const CONTROL_COUNT: usize = 17;

/// Build a well-formed frame with the given input bytes at offsets 8..=15
fn frame(input: [u8; 8]) -> Vec<u8> {
    let mut frame = vec![0; FRAME_SIZE];
    frame[8..].copy_from_slice(&input);
    frame
}

fn neutral() -> Vec<u8> {
    frame([0; 8])
}

#[tokio::test]
async fn test_first_frame_reports_every_control() -> Result<(), Box<dyn Error>> {
    let mut driver = Driver::new();
    let events = driver.handle_frame(&neutral())?;

    // One event per control plus the frame marker, neutral or not
    assert_eq!(events.len(), CONTROL_COUNT + 1);
    assert_eq!(events.last(), Some(&Event::Sync));
    assert!(events.contains(&Event::Button(ButtonEvent::A(BinaryInput { pressed: false }))));
    assert!(events.contains(&Event::Axis(AxisEvent::LStickX(AxisInput { value: 0 }))));

    Ok(())
}

#[tokio::test]
async fn test_first_frame_carries_decoded_values() -> Result<(), Box<dyn Error>> {
    let mut driver = Driver::new();
    let events = driver.handle_frame(&frame([0x11, 0x00, 0x00, 0x00, 10, 200, 0, 255]))?;

    assert_eq!(events.len(), CONTROL_COUNT + 1);
    assert!(events.contains(&Event::Button(ButtonEvent::DPadUp(BinaryInput {
        pressed: true
    }))));
    assert!(events.contains(&Event::Button(ButtonEvent::A(BinaryInput { pressed: true }))));
    assert!(events.contains(&Event::Button(ButtonEvent::B(BinaryInput { pressed: false }))));
    assert!(events.contains(&Event::Axis(AxisEvent::RStickX(AxisInput { value: 10 }))));
    assert!(events.contains(&Event::Axis(AxisEvent::RStickY(AxisInput { value: 56 }))));
    assert!(events.contains(&Event::Axis(AxisEvent::LStickX(AxisInput { value: 0 }))));
    assert!(events.contains(&Event::Axis(AxisEvent::LStickY(AxisInput { value: 1 }))));

    Ok(())
}

#[tokio::test]
async fn test_repeated_frame_only_syncs() -> Result<(), Box<dyn Error>> {
    let mut driver = Driver::new();
    let data = frame([0x11, 0x00, 0xFF, 0x00, 10, 200, 0, 255]);

    driver.handle_frame(&data)?;
    let events = driver.handle_frame(&data)?;
    assert_eq!(events, vec![Event::Sync]);

    Ok(())
}

#[tokio::test]
async fn test_single_change_is_isolated() -> Result<(), Box<dyn Error>> {
    let mut driver = Driver::new();
    driver.handle_frame(&neutral())?;

    let events = driver.handle_frame(&frame([0, 0, 0, 0, 10, 0, 0, 0]))?;
    assert_eq!(
        events,
        vec![
            Event::Axis(AxisEvent::RStickX(AxisInput { value: 10 })),
            Event::Sync,
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_button_press_and_release() -> Result<(), Box<dyn Error>> {
    let mut driver = Driver::new();
    driver.handle_frame(&neutral())?;

    let events = driver.handle_frame(&frame([0x10, 0, 0, 0, 0, 0, 0, 0]))?;
    assert_eq!(
        events,
        vec![
            Event::Button(ButtonEvent::A(BinaryInput { pressed: true })),
            Event::Sync,
        ]
    );

    let events = driver.handle_frame(&neutral())?;
    assert_eq!(
        events,
        vec![
            Event::Button(ButtonEvent::A(BinaryInput { pressed: false })),
            Event::Sync,
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_pause_and_shoulder_transitions() -> Result<(), Box<dyn Error>> {
    let mut driver = Driver::new();
    driver.handle_frame(&neutral())?;

    let events = driver.handle_frame(&frame([0, 0x04, 0, 0, 0, 0, 0, 0]))?;
    assert_eq!(
        events,
        vec![
            Event::Button(ButtonEvent::Pause(BinaryInput { pressed: true })),
            Event::Sync,
        ]
    );

    // Adding a shoulder bit stops the byte being the pause marker
    let events = driver.handle_frame(&frame([0, 0x14, 0, 0, 0, 0, 0, 0]))?;
    assert_eq!(
        events,
        vec![
            Event::Button(ButtonEvent::LB(BinaryInput { pressed: true })),
            Event::Button(ButtonEvent::Pause(BinaryInput { pressed: false })),
            Event::Sync,
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_malformed_frame_is_skipped_entirely() -> Result<(), Box<dyn Error>> {
    let mut driver = Driver::new();

    let result = driver.handle_frame(&[0u8; 10]);
    assert!(matches!(result, Err(ReportError::InvalidSize { size: 10 })));

    // The dropped frame left no trace; the next frame is still the first
    // observation and reports every control
    let events = driver.handle_frame(&neutral())?;
    assert_eq!(events.len(), CONTROL_COUNT + 1);

    Ok(())
}
