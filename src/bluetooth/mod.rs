//! BLE session plumbing: find the pad, subscribe to its input
//! characteristic, and pump notification frames through the driver into the
//! virtual gamepad. The virtual device only exists while a pad is connected.
use std::error::Error;
use std::time::Duration;

use btleplug::api::{
    Central, CentralEvent, Manager as _, Peripheral as _, PeripheralProperties, ScanFilter,
};
use btleplug::platform::{Adapter, Manager, Peripheral};
use futures::StreamExt;
use tokio::time;

use crate::drivers::skylanders::driver::{Driver, INPUT_CHARACTERISTIC};
use crate::input::target::gamepad::VirtualGamepad;

/// How often discovered peripherals are checked against the filter while
/// scanning
const SCAN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Selects which peripheral to bridge during discovery
#[derive(Debug, Clone)]
pub struct DeviceFilter {
    /// Advertised name to match
    pub name: String,
    /// Bluetooth address to match instead of the name, if given
    pub address: Option<String>,
}

impl DeviceFilter {
    fn matches(&self, properties: &PeripheralProperties) -> bool {
        if let Some(address) = &self.address {
            return properties.address.to_string().eq_ignore_ascii_case(address);
        }
        properties.local_name.as_deref() == Some(self.name.as_str())
    }
}

/// Run the bridge daemon. Repeats the scan/connect/pump cycle until the
/// process is stopped, so the pad can come and go.
pub async fn run(
    filter: DeviceFilter,
    scan_timeout: Duration,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let manager = Manager::new().await?;
    let adapters = manager.adapters().await?;
    let adapter = adapters
        .into_iter()
        .next()
        .ok_or("no Bluetooth adapter found")?;

    loop {
        let peripheral = discover(&adapter, &filter, scan_timeout).await?;
        if let Err(e) = run_session(&adapter, &peripheral).await {
            log::warn!("Session ended: {e}");
        }
        let _ = peripheral.disconnect().await;
    }
}

/// Scan until a peripheral matching the filter shows up
async fn discover(
    adapter: &Adapter,
    filter: &DeviceFilter,
    scan_timeout: Duration,
) -> Result<Peripheral, Box<dyn Error + Send + Sync>> {
    log::info!("Scanning for '{}'", filter.name);
    adapter.start_scan(ScanFilter::default()).await?;

    let mut waited = Duration::ZERO;
    loop {
        time::sleep(SCAN_POLL_INTERVAL).await;

        for peripheral in adapter.peripherals().await? {
            let Some(properties) = peripheral.properties().await? else {
                continue;
            };
            if filter.matches(&properties) {
                adapter.stop_scan().await?;
                log::info!(
                    "Found '{}' [{}]",
                    properties.local_name.as_deref().unwrap_or("(unnamed)"),
                    properties.address
                );
                return Ok(peripheral);
            }
        }

        waited += SCAN_POLL_INTERVAL;
        if waited >= scan_timeout {
            log::info!("'{}' not seen yet, still scanning", filter.name);
            waited = Duration::ZERO;
        }
    }
}

/// Bridge one connection: subscribe to the input characteristic, bring up
/// the virtual gamepad, and relay frames until the pad disconnects.
async fn run_session(
    adapter: &Adapter,
    peripheral: &Peripheral,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    log::info!("Connecting to {}", peripheral.address());
    peripheral.connect().await?;
    peripheral.discover_services().await?;

    let characteristic = peripheral
        .characteristics()
        .into_iter()
        .find(|characteristic| characteristic.uuid == INPUT_CHARACTERISTIC)
        .ok_or("input characteristic not found on device")?;
    peripheral.subscribe(&characteristic).await?;

    let mut gamepad = VirtualGamepad::new()?;
    let mut driver = Driver::new();

    let mut notifications = peripheral.notifications().await?;
    let mut central_events = adapter.events().await?;

    log::info!("Gamepad is live");
    loop {
        tokio::select! {
            notification = notifications.next() => {
                let Some(notification) = notification else {
                    break;
                };
                if notification.uuid != INPUT_CHARACTERISTIC {
                    continue;
                }
                log::trace!("Raw frame: {:02x?}", notification.value);
                match driver.handle_frame(&notification.value) {
                    Ok(events) => gamepad.write_events(&events)?,
                    Err(e) => log::warn!("Dropping frame: {e}"),
                }
            }
            event = central_events.next() => {
                if let Some(CentralEvent::DeviceDisconnected(id)) = event {
                    if id == peripheral.id() {
                        log::info!("Device disconnected");
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}
