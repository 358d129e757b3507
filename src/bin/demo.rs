//! NSE XML API Demo
//!
//! Demonstrates the library without needing a device on the network:
//! - schema help text rendering
//! - command building, validation and serialization
//! - response envelope interpretation
//! - device client setup (executed only when an address is supplied)
//!
//! Usage: cargo run --bin demo [device_host]
//! Example: cargo run --bin demo 10.0.0.1

use std::time::Duration;

use nse_xmlapi::commands::{CACHE_UPDATE, RADIUS_LOGIN, SET_BANDWIDTH_MAX_DOWN};
use nse_xmlapi::{Command, MacAddress, NseClient, NseError, Response};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("NSE XML API v{} Demo", nse_xmlapi::VERSION);
    println!("=========================\n");

    // =========================================================================
    // Part 1: Schema help (no connection required)
    // =========================================================================
    println!("Part 1: Schema help");
    println!("-------------------");
    println!("{}\n", Command::new(&RADIUS_LOGIN).help());

    // =========================================================================
    // Part 2: Command serialization
    // =========================================================================
    println!("Part 2: Command serialization");
    println!("-----------------------------");

    let mac = MacAddress::parse("00:1a:2b:3c:4d:5e")?;
    println!("  canonical MAC: {} ({})", mac, mac.format(":"));

    let login = Command::new(&RADIUS_LOGIN)
        .set("SUB_USER_NAME", "alice")
        .set("SUB_PASSWORD", "secret")
        .set("SUB_MAC_ADDR", mac.clone())
        .to_xml()?;
    println!("  RADIUS_LOGIN: {login}");

    let refresh = Command::new(&CACHE_UPDATE).arg(mac.clone()).to_xml()?;
    println!("  CACHE_UPDATE: {refresh}");

    let cap = Command::new(&SET_BANDWIDTH_MAX_DOWN)
        .set("SUBSCRIBER", mac)
        .set("BANDWIDTH_MAX_DOWN", 2048)
        .to_xml()?;
    println!("  SET_BANDWIDTH_MAX_DOWN: {cap}\n");

    // =========================================================================
    // Part 3: Response interpretation
    // =========================================================================
    println!("Part 3: Response interpretation");
    println!("-------------------------------");

    let ok = Response::parse(r#"<USG RESULT="OK" COMMAND="RADIUS_LOGIN"/>"#)?;
    println!("  success payload: {:?}", ok.attributes);

    match Response::parse(r#"<USG RESULT="ERROR" ERROR_NUM="201"/>"#) {
        Err(NseError::Device { code, description }) => {
            println!("  device error {code}: {description}");
        }
        other => println!("  unexpected: {other:?}"),
    }

    // =========================================================================
    // Part 4: Live device (optional)
    // =========================================================================
    if let Some(host) = std::env::args().nth(1) {
        println!("\nPart 4: Live device at {host}");
        println!("------------------------------");
        let mut client = NseClient::new(host).with_timeout(Duration::from_secs(5));
        client.open_probed(Duration::from_secs(5)).await?;

        let mut cmd = Command::new(&CACHE_UPDATE).arg("00:1A:2B:3C:4D:5E");
        match client.execute(&mut cmd).await {
            Ok(response) => println!("  RESULT: {:?}", response.attribute("RESULT")),
            Err(err) => println!("  command failed: {err}"),
        }
        client.close();
    }

    Ok(())
}
