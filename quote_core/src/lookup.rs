//! # Public IP Lookup
//!
//! One-shot query of the caller's public IP for the usage log. Quote
//! generation must never fail because this lookup failed, so every
//! error path collapses to the literal `"unknown"`.

use std::time::Duration;

use tracing::warn;

const IP_ENDPOINT: &str = "https://api.ipify.org";
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Sentinel recorded when the lookup fails.
pub const UNKNOWN_IP: &str = "unknown";

/// Fetch the public IP, substituting `"unknown"` on any failure.
pub fn public_ip() -> String {
    match try_public_ip() {
        Ok(ip) if !ip.is_empty() => ip,
        Ok(_) => UNKNOWN_IP.to_string(),
        Err(e) => {
            warn!("public IP lookup failed: {}", e);
            UNKNOWN_IP.to_string()
        }
    }
}

fn try_public_ip() -> Result<String, reqwest::Error> {
    let client = reqwest::blocking::Client::builder()
        .timeout(LOOKUP_TIMEOUT)
        .build()?;
    let text = client.get(IP_ENDPOINT).send()?.error_for_status()?.text()?;
    Ok(text.trim().to_string())
}
