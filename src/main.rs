//! splice-descriptors - inspect SCTE-35 splice descriptors.
//!
//! Decodes a descriptor loop given as base64 or hex and prints every
//! descriptor as text or JSON.

use clap::{Parser, ValueEnum};
use data_encoding::{BASE64, HEXLOWER_PERMISSIVE};
use log::debug;
use serde_json::json;
use std::process;

use splice_descriptors::fmt::{format_identifier, format_seconds, format_upid};
use splice_descriptors::upid::upid_type_name;
use splice_descriptors::{DescriptorBody, SegmentationDescriptor, SpliceDescriptor};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    Base64,
    Hex,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Decode SCTE-35 splice descriptors
#[derive(Parser, Debug)]
#[command(name = "splice-descriptors", version, about = "Decode SCTE-35 splice descriptors")]
struct Cli {
    /// Encoded descriptor bytes (one or more consecutive descriptors)
    payload: String,

    /// Encoding of the payload
    #[arg(short, long, value_enum, default_value_t = InputFormat::Base64)]
    format: InputFormat,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let descriptors = decode_payload(&cli.payload, cli.format);
    match (descriptors, cli.output) {
        (Ok(descriptors), OutputFormat::Text) => print_text(&descriptors),
        (Ok(descriptors), OutputFormat::Json) => {
            let output = json!({ "status": "success", "descriptors": descriptors });
            println!("{output:#}");
        }
        (Err(message), OutputFormat::Text) => {
            eprintln!("Error: {message}");
            process::exit(1);
        }
        (Err(message), OutputFormat::Json) => {
            let output = json!({ "status": "error", "error": message });
            println!("{output:#}");
            process::exit(1);
        }
    }
}

fn decode_payload(payload: &str, format: InputFormat) -> Result<Vec<SpliceDescriptor>, String> {
    let payload = payload.trim();
    let bytes = match format {
        InputFormat::Base64 => BASE64
            .decode(payload.as_bytes())
            .map_err(|e| format!("invalid base64 payload: {e}"))?,
        InputFormat::Hex => {
            let digits = payload
                .strip_prefix("0x")
                .or_else(|| payload.strip_prefix("0X"))
                .unwrap_or(payload);
            HEXLOWER_PERMISSIVE
                .decode(digits.as_bytes())
                .map_err(|e| format!("invalid hex payload: {e}"))?
        }
    };
    debug!("decoding {} payload bytes", bytes.len());

    splice_descriptors::parse_descriptor_loop(&bytes)
        .map_err(|e| format!("could not decode splice descriptors: {e}"))
}

fn print_text(descriptors: &[SpliceDescriptor]) {
    println!("Decoded {} splice descriptor(s):", descriptors.len());
    for descriptor in descriptors {
        println!("  {}:", descriptor.name());
        println!("    Tag: 0x{:02x}", descriptor.tag());
        println!("    Length: {}", descriptor.length());
        println!(
            "    Identifier: {}",
            format_identifier(descriptor.identifier())
        );

        match descriptor.body() {
            DescriptorBody::Avail(avail) => {
                println!("    Provider Avail ID: {}", avail.provider_avail_id);
            }
            DescriptorBody::Dtmf(dtmf) => {
                println!("    Preroll: {}", dtmf.preroll);
                println!("    DTMF Count: {}", dtmf.dtmf_count);
                println!("    DTMF Chars: {:?}", dtmf.dtmf_chars);
            }
            DescriptorBody::Segmentation(segmentation) => print_segmentation(segmentation),
            DescriptorBody::Time(time) => {
                println!("    TAI Seconds: {}", time.tai_seconds);
                println!("    TAI Nanoseconds: {}", time.tai_ns);
                println!("    UTC Offset: {}", time.utc_offset);
            }
            DescriptorBody::Unknown(_) => {}
        }
    }
}

fn print_segmentation(segmentation: &SegmentationDescriptor) {
    println!(
        "    Segmentation Event ID: {}",
        segmentation.segmentation_event_id
    );
    println!(
        "    Segmentation Event Cancel: {}",
        segmentation.segmentation_event_cancel_indicator
    );
    if segmentation.segmentation_event_cancel_indicator {
        return;
    }

    println!(
        "    Program Segmentation Flag: {}",
        segmentation.program_segmentation_flag
    );
    println!(
        "    Delivery Not Restricted: {}",
        segmentation.delivery_not_restricted_flag
    );
    if let Some(flag) = segmentation.web_delivery_allowed_flag {
        println!("    Web Delivery Allowed: {flag}");
    }
    if let Some(flag) = segmentation.no_regional_blackout_flag {
        println!("    No Regional Blackout: {flag}");
    }
    if let Some(flag) = segmentation.archive_allowed_flag {
        println!("    Archive Allowed: {flag}");
    }
    if let Some(restrictions) = &segmentation.device_restrictions {
        println!("    Device Restrictions: {restrictions}");
    }
    if let Some(duration) = segmentation.segmentation_duration {
        println!("    Segmentation Duration: {}", format_seconds(duration));
    }

    println!(
        "    UPID Type: 0x{:02x} ({})",
        segmentation.segmentation_upid_type,
        upid_type_name(segmentation.segmentation_upid_type)
    );
    println!(
        "    UPID Length: {}",
        segmentation.segmentation_upid_length
    );
    if let Some(upid) = &segmentation.segmentation_upid {
        println!("    UPID: {}", format_upid(upid));
    }

    println!(
        "    Segmentation Type ID: 0x{:02x} ({})",
        segmentation.segmentation_type_id,
        segmentation.segmentation_message()
    );
    println!("    Segment Num: {}", segmentation.segment_num);
    println!("    Segments Expected: {}", segmentation.segments_expected);
    if let (Some(num), Some(expected)) = (
        segmentation.sub_segment_num,
        segmentation.sub_segments_expected,
    ) {
        println!("    Sub Segment Num: {num}");
        println!("    Sub Segments Expected: {expected}");
    }
}
