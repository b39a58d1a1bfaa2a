//! cadence-admin CLI tool
//!
//! Operator commands for a running Cadence node.
//!
//! Usage:
//!   cadence-admin reset
//!   cadence-admin status
//!   cadence-admin ping

use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

/// Admin command sent over the socket.
#[derive(Debug, Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
enum AdminCommand {
    Reset,
    Status,
    Ping,
}

/// Response from admin command.
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum AdminResponse {
    Ok { message: String },
    Error { error: String },
    Snapshot { snapshot: serde_json::Value },
    Pong,
}

fn print_usage() {
    eprintln!("cadence-admin - Operate a running Cadence node");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cadence-admin reset    Discard the current run (live or finalized)");
    eprintln!("  cadence-admin status   Show run phase and summary");
    eprintln!("  cadence-admin ping     Check if the node is running");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CADENCE_SOCKET  Path to admin socket (default: ./cadence-admin.sock)");
}

fn get_socket_path() -> PathBuf {
    std::env::var("CADENCE_SOCKET")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./cadence-admin.sock"))
}

fn send_command(cmd: AdminCommand) -> Result<AdminResponse, String> {
    let socket_path = get_socket_path();

    let mut stream = UnixStream::connect(&socket_path).map_err(|e| {
        format!(
            "Failed to connect to cadence-node at {:?}: {}\n\
             Is the cadence-node running?",
            socket_path, e
        )
    })?;

    let cmd_json = serde_json::to_string(&cmd).map_err(|e| e.to_string())?;
    writeln!(stream, "{}", cmd_json).map_err(|e| e.to_string())?;

    let mut reader = BufReader::new(&stream);
    let mut response_line = String::new();
    reader
        .read_line(&mut response_line)
        .map_err(|e| e.to_string())?;

    serde_json::from_str(&response_line).map_err(|e| format!("Invalid response: {}", e))
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let cmd = match args[1].as_str() {
        "reset" => AdminCommand::Reset,
        "status" => AdminCommand::Status,
        "ping" => AdminCommand::Ping,
        "-h" | "--help" | "help" => {
            print_usage();
            std::process::exit(0);
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            std::process::exit(1);
        }
    };

    match send_command(cmd) {
        Ok(AdminResponse::Ok { message }) => println!("{}", message),
        Ok(AdminResponse::Error { error }) => {
            eprintln!("Error: {}", error);
            std::process::exit(1);
        }
        Ok(AdminResponse::Snapshot { snapshot }) => {
            let pretty = serde_json::to_string_pretty(&snapshot)
                .unwrap_or_else(|_| snapshot.to_string());
            println!("{}", pretty);
        }
        Ok(AdminResponse::Pong) => println!("pong - cadence-node is running"),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
