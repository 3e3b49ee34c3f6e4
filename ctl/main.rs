#![forbid(unsafe_code)]

//! `command-bridge-ctl` — local CLI companion for `command-bridge`.
//!
//! Connects to the bridge endpoint, sends one JSON command, and prints
//! the `result` payload or `error` message from the reply.

use std::net::{IpAddr, SocketAddr};

use clap::{Parser, Subcommand};

use command_bridge::bridge::client::BridgeClient;

#[derive(Debug, Parser)]
#[command(
    name = "command-bridge-ctl",
    about = "Local CLI for the command-bridge server",
    version,
    long_about = None
)]
struct Cli {
    /// Bridge endpoint host (must match the server's `host` config).
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Bridge endpoint port (must match the server's `port` config).
    #[arg(long, default_value_t = 50505)]
    port: u16,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Ask the server to identify itself.
    About,

    /// Send a raw command string or registered alias.
    Send {
        /// Command verb to deliver.
        command: String,
    },
}

fn main() {
    let args = Cli::parse();

    let ip: IpAddr = match args.host.parse() {
        Ok(ip) => ip,
        Err(err) => {
            eprintln!("Invalid host '{}': {err}", args.host);
            std::process::exit(2);
        }
    };
    let addr = SocketAddr::new(ip, args.port);

    let command = match args.command {
        Command::About => "about".to_owned(),
        Command::Send { command } => command,
    };

    let client = BridgeClient::new(addr);
    match client.call(&command) {
        Ok(response) => {
            if response.is_result() {
                match response.result {
                    Some(serde_json::Value::String(ref s)) => println!("{s}"),
                    Some(ref value) => {
                        println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
                    }
                    None => println!("OK"),
                }
            } else {
                eprintln!("Error: {}", response.summary());
                std::process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("Failed to reach bridge: {err}");
            eprintln!("Is command-bridge running on {addr}?");
            std::process::exit(1);
        }
    }
}
