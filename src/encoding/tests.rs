//! Tests for the encoding module.

use crate::descriptors::*;
use crate::encoding::{BitWriter, Encodable, EncodingError};
use crate::upid::Upid;

fn placement_opportunity() -> SegmentationDescriptor {
    SegmentationDescriptor {
        segmentation_event_id: "0x4800008e".to_string(),
        segmentation_event_id_compliance_indicator: true,
        program_segmentation_flag: true,
        segmentation_duration_flag: true,
        web_delivery_allowed_flag: Some(false),
        no_regional_blackout_flag: Some(true),
        archive_allowed_flag: Some(true),
        device_restrictions: Some("No Restrictions".to_string()),
        segmentation_duration: Some(307.0),
        segmentation_upid_type: 0x08,
        segmentation_upid_length: 8,
        segmentation_upid: Some(Upid::Hex("0x000000002ca0a18a".to_string())),
        segmentation_type_id: 0x34,
        segment_num: 2,
        segments_expected: 0,
        sub_segment_num: Some(0x9a),
        sub_segments_expected: Some(0xc9),
        ..Default::default()
    }
}

#[test]
fn test_avail_descriptor_encoding() {
    let descriptor = SpliceDescriptor::cuei(AvailDescriptor {
        provider_avail_id: 0x135,
    })
    .unwrap();
    let buffer = descriptor.encode_to_vec().unwrap();

    assert_eq!(
        buffer,
        vec![0x00, 0x08, b'C', b'U', b'E', b'I', 0x00, 0x00, 0x01, 0x35]
    );
    assert_eq!(buffer.len(), descriptor.encoded_size());
}

#[test]
fn test_encode_body_omits_tag_and_length() {
    let descriptor = SpliceDescriptor::cuei(AvailDescriptor {
        provider_avail_id: 1,
    })
    .unwrap();
    let mut writer = BitWriter::new();
    descriptor.encode_body(&mut writer).unwrap();

    assert_eq!(
        writer.finish(),
        vec![b'C', b'U', b'E', b'I', 0x00, 0x00, 0x00, 0x01]
    );
}

#[test]
fn test_dtmf_reserved_bits_are_zero() {
    let dtmf = DtmfDescriptor {
        preroll: 10,
        dtmf_count: 2,
        dtmf_chars: "1#".to_string(),
    };
    let buffer = dtmf.encode_to_vec().unwrap();

    assert_eq!(buffer, vec![0x0A, 0x40, b'1', b'#']);
    assert_eq!(buffer.len(), dtmf.encoded_size());
}

#[test]
fn test_dtmf_count_validation() {
    let too_many = DtmfDescriptor {
        preroll: 0,
        dtmf_count: 8,
        dtmf_chars: "12345678".to_string(),
    };
    assert!(matches!(
        too_many.encode_to_vec(),
        Err(EncodingError::ValueTooLarge {
            field: "dtmf_count",
            ..
        })
    ));

    let mismatch = DtmfDescriptor {
        preroll: 0,
        dtmf_count: 3,
        dtmf_chars: "12".to_string(),
    };
    assert!(matches!(
        mismatch.encode_to_vec(),
        Err(EncodingError::InvalidFieldValue {
            field: "dtmf_chars",
            ..
        })
    ));
}

#[test]
fn test_time_descriptor_encoding() {
    let time = TimeDescriptor {
        tai_seconds: 0x5E0E_1F80,
        tai_ns: 1000,
        utc_offset: 37,
    };
    assert_eq!(
        time.encode_to_vec().unwrap(),
        vec![
            0x00, 0x00, 0x5E, 0x0E, 0x1F, 0x80, 0x00, 0x00, 0x03, 0xE8, 0x00, 0x25
        ]
    );

    let overflow = TimeDescriptor {
        tai_seconds: 1 << 48,
        ..time
    };
    assert!(matches!(
        overflow.encode_to_vec(),
        Err(EncodingError::ValueTooLarge {
            field: "tai_seconds",
            ..
        })
    ));
}

#[test]
fn test_segmentation_encoded_size() {
    let segmentation = placement_opportunity();
    let buffer = segmentation.encode_to_vec().unwrap();

    assert_eq!(buffer.len(), 26);
    assert_eq!(buffer.len(), segmentation.encoded_size());
    assert_eq!(SpliceDescriptor::cuei(segmentation).unwrap().length(), 30);
}

#[test]
fn test_segmentation_cancel_writes_five_bytes() {
    let segmentation = SegmentationDescriptor {
        segmentation_event_id: "0x00000001".to_string(),
        segmentation_event_cancel_indicator: true,
        // ignored once cancelled
        segmentation_duration_flag: true,
        ..Default::default()
    };

    assert_eq!(
        segmentation.encode_to_vec().unwrap(),
        vec![0x00, 0x00, 0x00, 0x01, 0x80]
    );
    assert_eq!(segmentation.encoded_size(), 5);
}

#[test]
fn test_segmentation_device_restrictions_by_label() {
    for (label, code) in [
        ("Restrict Group 0", 0u8),
        ("Restrict Group 1", 1),
        ("Restrict Group 2", 2),
        ("No Restrictions", 3),
    ] {
        let segmentation = SegmentationDescriptor {
            device_restrictions: Some(label.to_string()),
            ..placement_opportunity()
        };
        let buffer = segmentation.encode_to_vec().unwrap();
        assert_eq!(buffer[5] & 0x03, code, "{label}");
    }
}

#[test]
fn test_segmentation_unresolved_device_restrictions() {
    let segmentation = SegmentationDescriptor {
        device_restrictions: Some("Group 7".to_string()),
        ..placement_opportunity()
    };
    assert_eq!(
        segmentation.encode_to_vec(),
        Err(EncodingError::UnresolvedLabel {
            field: "device_restrictions",
            label: "Group 7".to_string(),
        })
    );

    let segmentation = SegmentationDescriptor {
        device_restrictions: None,
        ..placement_opportunity()
    };
    assert_eq!(
        segmentation.encode_to_vec(),
        Err(EncodingError::MissingRequiredField {
            field: "device_restrictions",
        })
    );
}

#[test]
fn test_segmentation_duration_required_by_flag() {
    let segmentation = SegmentationDescriptor {
        segmentation_duration: None,
        ..placement_opportunity()
    };
    assert_eq!(
        segmentation.encode_to_vec(),
        Err(EncodingError::MissingRequiredField {
            field: "segmentation_duration",
        })
    );
}

#[test]
fn test_segmentation_upid_length_must_match_payload() {
    let segmentation = SegmentationDescriptor {
        segmentation_upid_length: 4,
        ..placement_opportunity()
    };
    assert!(matches!(
        segmentation.encode_to_vec(),
        Err(EncodingError::InvalidFieldValue {
            field: "segmentation_upid_length",
            ..
        })
    ));
}

#[test]
fn test_segmentation_sub_segments() {
    let missing = SegmentationDescriptor {
        sub_segments_expected: None,
        ..placement_opportunity()
    };
    assert_eq!(
        missing.encode_to_vec(),
        Err(EncodingError::MissingRequiredField {
            field: "sub_segments_expected",
        })
    );

    // break start carries no sub-segments, so the values are not written
    let break_start = SegmentationDescriptor {
        segmentation_type_id: 0x22,
        ..placement_opportunity()
    };
    let buffer = break_start.encode_to_vec().unwrap();
    assert_eq!(buffer.len(), 24);
    assert_eq!(&buffer[21..], &[0x22, 0x02, 0x00]);
}

#[test]
fn test_segmentation_invalid_event_id() {
    let segmentation = SegmentationDescriptor {
        segmentation_event_id: "0x123456789".to_string(),
        ..placement_opportunity()
    };
    assert!(matches!(
        segmentation.encode_to_vec(),
        Err(EncodingError::ValueTooLarge {
            field: "segmentation_event_id",
            ..
        })
    ));
}

#[test]
fn test_unknown_descriptor_cannot_be_encoded() {
    let descriptor = SpliceDescriptor::new("CUEI", DescriptorBody::Unknown(0x7F)).unwrap();

    assert_eq!(
        descriptor.encode_to_vec(),
        Err(EncodingError::UnsupportedDescriptorTag(0x7F))
    );
    let mut writer = BitWriter::new();
    assert_eq!(
        descriptor.encode_body(&mut writer),
        Err(EncodingError::UnsupportedDescriptorTag(0x7F))
    );
}

#[test]
fn test_identifier_must_be_four_characters() {
    let descriptor = SpliceDescriptor::new("CUE", AvailDescriptor::default()).unwrap();
    assert!(matches!(
        descriptor.encode_to_vec(),
        Err(EncodingError::InvalidFieldValue {
            field: "identifier",
            ..
        })
    ));
}

#[test]
fn test_descriptor_length_overflow() {
    let segmentation = SegmentationDescriptor {
        segmentation_event_id: "0x00000001".to_string(),
        delivery_not_restricted_flag: true,
        segmentation_upid_type: 0x10,
        segmentation_upid_length: 250,
        segmentation_upid: Some(Upid::Bytes(vec![0xAB; 250])),
        ..Default::default()
    };

    assert_eq!(
        SpliceDescriptor::cuei(segmentation),
        Err(EncodingError::ValueTooLarge {
            field: "descriptor_length",
            max_value: 255,
            actual_value: 265,
        })
    );
}

#[test]
fn test_refresh_length_rejects_oversized_body() {
    let mut descriptor = SpliceDescriptor::cuei(SegmentationDescriptor {
        segmentation_event_id: "0x00000001".to_string(),
        delivery_not_restricted_flag: true,
        segmentation_upid_type: 0x10,
        segmentation_upid_length: 4,
        segmentation_upid: Some(Upid::Bytes(vec![0xAB; 4])),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(descriptor.length(), 19);

    if let DescriptorBody::Segmentation(segmentation) = descriptor.body_mut() {
        segmentation.segmentation_upid_length = 250;
        segmentation.segmentation_upid = Some(Upid::Bytes(vec![0xAB; 250]));
    }

    assert!(matches!(
        descriptor.refresh_length(),
        Err(EncodingError::ValueTooLarge {
            field: "descriptor_length",
            actual_value: 265,
            ..
        })
    ));
    // the last valid length is kept
    assert_eq!(descriptor.length(), 19);
    assert!(matches!(
        descriptor.encode_to_vec(),
        Err(EncodingError::ValueTooLarge {
            field: "descriptor_length",
            ..
        })
    ));
}

#[test]
fn test_refresh_length_after_mutation() {
    let mut descriptor = SpliceDescriptor::cuei(DtmfDescriptor {
        preroll: 0,
        dtmf_count: 1,
        dtmf_chars: "1".to_string(),
    })
    .unwrap();
    assert_eq!(descriptor.length(), 7);

    if let DescriptorBody::Dtmf(dtmf) = descriptor.body_mut() {
        dtmf.dtmf_count = 3;
        dtmf.dtmf_chars = "123".to_string();
    }
    descriptor.refresh_length().unwrap();

    assert_eq!(descriptor.length(), 9);
    assert_eq!(descriptor.encode_to_vec().unwrap()[1], 9);
}

#[test]
fn test_restricted_delivery_requires_restriction_flags() {
    for field in [
        "web_delivery_allowed_flag",
        "no_regional_blackout_flag",
        "archive_allowed_flag",
    ] {
        let mut segmentation = placement_opportunity();
        match field {
            "web_delivery_allowed_flag" => segmentation.web_delivery_allowed_flag = None,
            "no_regional_blackout_flag" => segmentation.no_regional_blackout_flag = None,
            _ => segmentation.archive_allowed_flag = None,
        }

        assert_eq!(
            segmentation.encode_to_vec(),
            Err(EncodingError::MissingRequiredField { field }),
            "{field}"
        );
    }

    // unrestricted delivery carries none of them
    let segmentation = SegmentationDescriptor {
        delivery_not_restricted_flag: true,
        web_delivery_allowed_flag: None,
        no_regional_blackout_flag: None,
        archive_allowed_flag: None,
        device_restrictions: None,
        ..placement_opportunity()
    };
    assert!(segmentation.encode_to_vec().is_ok());
}
