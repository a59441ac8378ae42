use std::env;
use std::error::Error;
use std::process;
use std::time::Duration;

use clap::Parser;

use crate::bluetooth::DeviceFilter;
use crate::drivers::skylanders::driver::TARGET_NAME;

mod bluetooth;
mod drivers;
mod input;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Advertised name of the pad to bridge
    #[arg(long, default_value = TARGET_NAME)]
    name: String,

    /// Bluetooth address of the pad; matched instead of the name when given
    #[arg(long)]
    address: Option<String>,

    /// Seconds between "still scanning" reminders while the pad is away
    #[arg(long, default_value_t = 5)]
    scan_timeout: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let log_level = match env::var("LOG_LEVEL") {
        Ok(value) => value,
        Err(_) => "info".to_string(),
    };
    env::set_var("RUST_LOG", log_level);
    env_logger::init();
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    log::info!("Starting skypad v{}", VERSION);

    let args = Args::parse();

    // Setup CTRL+C handler. Exiting closes the uinput and BLE handles, which
    // removes the virtual device and drops the connection.
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.unwrap();
        log::info!("Shutting down");
        process::exit(0);
    });

    let filter = DeviceFilter {
        name: args.name,
        address: args.address,
    };
    let result = bluetooth::run(filter, Duration::from_secs(args.scan_timeout)).await;
    if let Err(e) = &result {
        log::error!("Bridge stopped: {e}");
    }

    result
}
