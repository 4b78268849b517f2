//! # Serve Utilities
//!
//! File: cli/src/commands/serve/utils.rs
//! Author: Christi Mahu
//!
use tracing::{debug, info};

/// Best-effort detection of the machine's LAN address for the startup
/// banner. Falls back to `"localhost"`.
pub fn get_local_ip() -> String {
    let commands = [
        "ipconfig getifaddr en0",
        "ipconfig getifaddr en1",
        "ip addr show | grep 'inet ' | grep -v '127.0.0.1' | head -n 1 | awk '{print $2}' | cut -d/ -f1",
        "ifconfig | grep 'inet ' | grep -v '127.0.0.1' | head -n 1 | awk '{print $2}'",
    ];

    for cmd_str in commands {
        match std::process::Command::new("sh").arg("-c").arg(cmd_str).output() {
            Ok(output) if output.status.success() => {
                let ip = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !ip.is_empty() && ip != "localhost" {
                    info!("Found local IP: {}", ip);
                    return ip;
                }
            }
            Ok(output) => debug!(
                "Command '{}' returned no address (status {:?})",
                cmd_str,
                output.status.code()
            ),
            Err(e) => debug!("Error executing '{}': {}", cmd_str, e),
        }
    }

    debug!("Could not detect a local network IP, using 'localhost'");
    "localhost".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_local_ip_is_never_empty() {
        assert!(!get_local_ip().is_empty());
    }
}
