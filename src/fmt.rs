//! Formatting utilities for displaying splice descriptors.
//!
//! These helpers back the text output of the command line tool: identifiers
//! that are not alphanumeric fall back to hex, long binary data is truncated,
//! and 90kHz durations are shown as seconds with six decimals.

use crate::upid::Upid;

/// Renders a descriptor identifier, falling back to hex when it is not made
/// of ASCII letters and digits.
///
/// # Examples
/// ```rust
/// use splice_descriptors::fmt::format_identifier;
///
/// assert_eq!(format_identifier("CUEI"), "CUEI");
/// assert_eq!(format_identifier("AB-D"), "0x41422d44");
/// ```
pub fn format_identifier(identifier: &str) -> String {
    if !identifier.is_empty() && identifier.chars().all(|c| c.is_ascii_alphanumeric()) {
        return identifier.to_string();
    }

    let hex: String = char_bytes(identifier).map(|b| format!("{b:02x}")).collect();
    format!("0x{hex}")
}

fn char_bytes(text: &str) -> impl Iterator<Item = u8> + '_ {
    text.chars().map(|c| u8::try_from(c).unwrap_or(b'?'))
}

/// Formats data as hex, truncating anything longer than 8 bytes.
///
/// # Examples
/// ```rust
/// use splice_descriptors::fmt::format_as_hex;
///
/// assert_eq!(format_as_hex(&[0x01, 0x02, 0x03]), "0x010203");
/// assert_eq!(format_as_hex(&(0..20).collect::<Vec<u8>>()), "0x000102030405... (20 bytes)");
/// ```
pub fn format_as_hex(data: &[u8]) -> String {
    if data.len() <= 8 {
        format!(
            "0x{}",
            data.iter().map(|b| format!("{b:02x}")).collect::<String>()
        )
    } else {
        let preview: String = data[..6].iter().map(|b| format!("{b:02x}")).collect();
        format!("0x{}... ({} bytes)", preview, data.len())
    }
}

/// Formats a duration in seconds with six decimals.
///
/// # Examples
/// ```rust
/// use splice_descriptors::fmt::format_seconds;
///
/// assert_eq!(format_seconds(307.0), "307.000000 seconds");
/// ```
pub fn format_seconds(secs: f64) -> String {
    format!("{secs:.6} seconds")
}

/// Formats a UPID payload on one line.
pub fn format_upid(upid: &Upid) -> String {
    match upid {
        Upid::Text(text) => {
            if text.chars().all(|c| c.is_ascii_graphic() || c == ' ') {
                format!("\"{text}\"")
            } else {
                format_as_hex(&char_bytes(text).collect::<Vec<u8>>())
            }
        }
        Upid::Hex(hex) => hex.clone(),
        Upid::Mpu {
            format_identifier: identifier,
            private_data,
        } => format!(
            "MPU {} {}",
            format_identifier(identifier),
            format_as_hex(private_data)
        ),
        Upid::Mid(upids) => {
            let entries: Vec<String> = upids
                .iter()
                .map(|m| format!("0x{:02x}: {}", m.upid_type, format_upid(&m.upid)))
                .collect();
            format!("MID [{}]", entries.join(", "))
        }
        Upid::Bytes(bytes) => format_as_hex(bytes),
    }
}
