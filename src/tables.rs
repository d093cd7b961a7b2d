//! Static lookup tables for human-readable labels.
//!
//! The tables are plain `'static` data: they are never written after
//! compilation and can be read from any number of threads.

/// Device restriction labels, indexed by the 2-bit `device_restrictions` code.
pub const DEVICE_RESTRICTIONS: [&str; 4] = [
    "Restrict Group 0",
    "Restrict Group 1",
    "Restrict Group 2",
    "No Restrictions",
];

/// Segmentation type IDs and their labels, sorted by ID.
pub const SEGMENTATION_TYPES: &[(u8, &str)] = &[
    (0x00, "Not Indicated"),
    (0x01, "Content Identification"),
    (0x10, "Program Start"),
    (0x11, "Program End"),
    (0x12, "Program Early Termination"),
    (0x13, "Program Breakaway"),
    (0x14, "Program Resumption"),
    (0x15, "Program Runover Planned"),
    (0x16, "Program Runover Unplanned"),
    (0x17, "Program Overlap Start"),
    (0x18, "Program Blackout Override"),
    (0x19, "Program Start - In Progress"),
    (0x20, "Chapter Start"),
    (0x21, "Chapter End"),
    (0x22, "Break Start"),
    (0x23, "Break End"),
    (0x24, "Opening Credit Start"),
    (0x25, "Opening Credit End"),
    (0x26, "Closing Credit Start"),
    (0x27, "Closing Credit End"),
    (0x30, "Provider Advertisement Start"),
    (0x31, "Provider Advertisement End"),
    (0x32, "Distributor Advertisement Start"),
    (0x33, "Distributor Advertisement End"),
    (0x34, "Provider Placement Opportunity Start"),
    (0x35, "Provider Placement Opportunity End"),
    (0x36, "Distributor Placement Opportunity Start"),
    (0x37, "Distributor Placement Opportunity End"),
    (0x38, "Provider Overlay Placement Opportunity Start"),
    (0x39, "Provider Overlay Placement Opportunity End"),
    (0x3A, "Distributor Overlay Placement Opportunity Start"),
    (0x3B, "Distributor Overlay Placement Opportunity End"),
    (0x3C, "Provider Promo Start"),
    (0x3D, "Provider Promo End"),
    (0x3E, "Distributor Promo Start"),
    (0x3F, "Distributor Promo End"),
    (0x40, "Unscheduled Event Start"),
    (0x41, "Unscheduled Event End"),
    (0x42, "Alternate Content Opportunity Start"),
    (0x43, "Alternate Content Opportunity End"),
    (0x44, "Provider Ad Block Start"),
    (0x45, "Provider Ad Block End"),
    (0x46, "Distributor Ad Block Start"),
    (0x47, "Distributor Ad Block End"),
    (0x50, "Network Start"),
    (0x51, "Network End"),
];

/// Segmentation type IDs that carry `sub_segment_num` and
/// `sub_segments_expected`.
pub const SUB_SEGMENT_TYPE_IDS: [u8; 8] = [0x30, 0x32, 0x34, 0x36, 0x38, 0x3A, 0x44, 0x46];

/// Returns the label for a 2-bit device restriction code.
pub fn device_restriction_label(code: u8) -> Option<&'static str> {
    DEVICE_RESTRICTIONS.get(usize::from(code)).copied()
}

/// Resolves a device restriction label back to its 2-bit code.
pub fn device_restriction_code(label: &str) -> Option<u8> {
    DEVICE_RESTRICTIONS
        .iter()
        .position(|&l| l == label)
        .map(|code| code as u8)
}

/// Returns the label for a segmentation type ID.
pub fn segmentation_type_label(id: u8) -> Option<&'static str> {
    SEGMENTATION_TYPES
        .binary_search_by_key(&id, |&(key, _)| key)
        .ok()
        .map(|index| SEGMENTATION_TYPES[index].1)
}

/// Whether a segmentation type ID is followed by the two sub-segment fields.
pub fn has_sub_segments(segmentation_type_id: u8) -> bool {
    SUB_SEGMENT_TYPE_IDS.contains(&segmentation_type_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_restrictions_are_symmetric() {
        for code in 0..4u8 {
            let label = device_restriction_label(code).unwrap();
            assert_eq!(device_restriction_code(label), Some(code));
        }
        assert_eq!(device_restriction_label(3), Some("No Restrictions"));
        assert_eq!(device_restriction_label(4), None);
        assert_eq!(device_restriction_code(""), None);
    }

    #[test]
    fn test_segmentation_types_are_sorted() {
        assert!(SEGMENTATION_TYPES.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_segmentation_type_label() {
        assert_eq!(
            segmentation_type_label(0x34),
            Some("Provider Placement Opportunity Start")
        );
        assert_eq!(segmentation_type_label(0x00), Some("Not Indicated"));
        assert_eq!(segmentation_type_label(0x51), Some("Network End"));
        assert_eq!(segmentation_type_label(0x02), None);
        assert_eq!(segmentation_type_label(0xFF), None);
    }

    #[test]
    fn test_has_sub_segments() {
        assert!(has_sub_segments(0x34));
        assert!(has_sub_segments(0x46));
        assert!(!has_sub_segments(0x22));
        assert!(!has_sub_segments(0x35));
    }
}
