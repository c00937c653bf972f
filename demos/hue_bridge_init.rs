//! Pairs with a Hue bridge on the local network and lists its lights.
//!
//! Run with: cargo run --example hue_bridge_init -- --help

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use hue_bridge::{
    Credential, HueBridge, LightAlert, LightState, Pairing, PairingRequest, default_config_path,
    discover_bridges,
};

#[derive(Parser)]
#[command(name = "hue-bridge-init")]
#[command(about = "Create an API token on a Hue bridge and check it works", long_about = None)]
struct Cli {
    /// Where to write the credential file (default: ~/.config/hue_bridge_config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bridge address; discovered on the network when omitted
    #[arg(long)]
    host: Option<String>,

    /// Application name to register the token under (20 characters max)
    #[arg(long, default_value = "hue_bridge")]
    app_name: String,

    /// Device name to register the token under (19 characters max)
    #[arg(long, default_value = "cli")]
    device_name: String,

    /// Also ask the bridge for a client key
    #[arg(long)]
    generate_client_key: bool,

    /// Do not blink the lights once paired
    #[arg(long)]
    no_blink: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };

    let credential = match Credential::load(&config_path)? {
        Some(credential) => {
            println!("Using the credential in {}", config_path.display());
            credential
        }
        None => {
            let host = match cli.host {
                Some(host) => host,
                None => pick_bridge()?,
            };
            let request = PairingRequest::new(&cli.app_name, &cli.device_name)?
                .generate_client_key(cli.generate_client_key);

            prompt("Press the link button on the bridge then press enter")?;
            let credential = Pairing::new(&host, request).run_and_save(&config_path)?;
            println!("Credential written to {}", config_path.display());
            credential
        }
    };

    let bridge = HueBridge::from_credential(credential)?;
    let lights = bridge.lights()?;

    println!("{} with lights:", bridge);
    for (id, name) in &lights {
        println!("    - {}: {}", id, name);
    }

    if !cli.no_blink {
        println!("Checking access by making all the lights blink for 3 seconds");
        for id in lights.keys() {
            bridge.set_light_state(*id, &LightState::from(LightAlert::LSelect))?;
        }
        thread::sleep(Duration::from_secs(3));
        for id in lights.keys() {
            bridge.set_light_state(*id, &LightState::from(LightAlert::None))?;
        }
    }

    println!("Setup done");
    Ok(())
}

fn pick_bridge() -> Result<String, Box<dyn std::error::Error>> {
    println!("Looking for Hue bridges on the local network...");
    let bridges = discover_bridges(Duration::from_secs(10))?;

    for bridge in bridges {
        println!("Hue bridge found at {}", bridge.host());
        let answer = prompt("Would you like to create an API token? [Y/n]")?;
        if matches!(answer.to_lowercase().as_str(), "" | "y" | "yes") {
            return Ok(bridge.host());
        }
        println!("Bridge {} not set up", bridge.host());
    }

    Err("no bridge selected; pass --host to pick one".into())
}

fn prompt(message: &str) -> io::Result<String> {
    print!("{} ", message);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
