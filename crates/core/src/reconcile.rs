//! Field-by-field comparison between embedded tags and sidecar values.

use crate::dates;
use crate::sidecar::SidecarMetadata;
use backend::TagRecord;

/// True when the embedded tags diverge from the sidecar. A missing
/// sidecar title counts as the empty string, and a sidecar date that
/// does not parse compares as absent.
pub fn needs_update(current: &TagRecord, sidecar: &SidecarMetadata) -> bool {
    if current.title != Some(sidecar.title.clone().unwrap_or_default()) {
        return true;
    }
    if current.creation_date != dates::format_tag_date(&sidecar.creation_time.formatted) {
        return true;
    }
    if current.modify_date != dates::format_tag_date(&sidecar.modification_time.formatted) {
        return true;
    }
    // GPS counts as divergent only when both coordinates disagree.
    current.gps_latitude != sidecar.geo_data.latitude
        && current.gps_longitude != sidecar.geo_data.longitude
}

/// Build the record to write back. `None` when either sidecar date is
/// unparsable; GPS is included only when both coordinates are present.
pub fn build_update(sidecar: &SidecarMetadata) -> Option<TagRecord> {
    let creation_date = dates::format_tag_date(&sidecar.creation_time.formatted)?;
    let modify_date = dates::format_tag_date(&sidecar.modification_time.formatted)?;
    let mut update = TagRecord {
        title: Some(sidecar.title.clone().unwrap_or_default()),
        creation_date: Some(creation_date),
        modify_date: Some(modify_date),
        ..TagRecord::default()
    };
    if let (Some(lat), Some(lon)) = (sidecar.geo_data.latitude, sidecar.geo_data.longitude) {
        update.gps_latitude = Some(lat);
        update.gps_longitude = Some(lon);
    }
    Some(update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sidecar::{GeoData, TimestampEntry};

    fn sidecar(title: Option<&str>, lat: Option<f64>, lon: Option<f64>) -> SidecarMetadata {
        SidecarMetadata {
            title: title.map(str::to_string),
            creation_time: TimestampEntry {
                formatted: "1 Jan 2023, 10:00".to_string(),
            },
            modification_time: TimestampEntry {
                formatted: "2 Jan 2023, 11:30".to_string(),
            },
            geo_data: GeoData {
                latitude: lat,
                longitude: lon,
            },
        }
    }

    fn matching_tags(title: &str, lat: Option<f64>, lon: Option<f64>) -> TagRecord {
        TagRecord {
            title: Some(title.to_string()),
            creation_date: Some("2023:01:01 10:00:00".to_string()),
            modify_date: Some("2023:01:02 11:30:00".to_string()),
            gps_latitude: lat,
            gps_longitude: lon,
        }
    }

    #[test]
    fn empty_tags_diverge_from_a_populated_sidecar() {
        let meta = sidecar(Some("Trip"), Some(40.0), Some(-3.0));
        assert!(needs_update(&TagRecord::default(), &meta));
    }

    #[test]
    fn matching_tags_need_no_update() {
        let meta = sidecar(Some("Trip"), Some(40.0), Some(-3.0));
        let current = matching_tags("Trip", Some(40.0), Some(-3.0));
        assert!(!needs_update(&current, &meta));
    }

    #[test]
    fn missing_sidecar_title_compares_as_empty() {
        let meta = sidecar(None, Some(40.0), Some(-3.0));
        let current = matching_tags("", Some(40.0), Some(-3.0));
        assert!(!needs_update(&current, &meta));

        let untitled = matching_tags("Trip", Some(40.0), Some(-3.0));
        assert!(needs_update(&untitled, &meta));
    }

    #[test]
    fn one_divergent_coordinate_is_not_a_gps_change() {
        let meta = sidecar(Some("Trip"), Some(40.0), Some(-3.0));
        let lat_matches = matching_tags("Trip", Some(40.0), Some(99.0));
        assert!(!needs_update(&lat_matches, &meta));

        let lon_matches = matching_tags("Trip", Some(99.0), Some(-3.0));
        assert!(!needs_update(&lon_matches, &meta));
    }

    #[test]
    fn both_divergent_coordinates_are_a_gps_change() {
        let meta = sidecar(Some("Trip"), Some(40.0), Some(-3.0));
        let current = matching_tags("Trip", Some(99.0), Some(99.0));
        assert!(needs_update(&current, &meta));
    }

    #[test]
    fn unparsable_dates_compare_as_absent() {
        let mut meta = sidecar(Some("Trip"), None, None);
        meta.creation_time.formatted = "31 Xyz 2023, 99:99".to_string();

        let mut current = matching_tags("Trip", None, None);
        assert!(needs_update(&current, &meta));

        current.creation_date = None;
        assert!(!needs_update(&current, &meta));
    }

    #[test]
    fn update_carries_formatted_dates_and_title() {
        let update = build_update(&sidecar(Some("Trip"), Some(40.0), Some(-3.0))).unwrap();
        assert_eq!(update.title.as_deref(), Some("Trip"));
        assert_eq!(update.creation_date.as_deref(), Some("2023:01:01 10:00:00"));
        assert_eq!(update.modify_date.as_deref(), Some("2023:01:02 11:30:00"));
        assert_eq!(update.gps_latitude, Some(40.0));
        assert_eq!(update.gps_longitude, Some(-3.0));
    }

    #[test]
    fn update_defaults_a_missing_title() {
        let update = build_update(&sidecar(None, None, None)).unwrap();
        assert_eq!(update.title.as_deref(), Some(""));
    }

    #[test]
    fn update_requires_both_dates_to_parse() {
        let mut meta = sidecar(Some("Trip"), None, None);
        meta.modification_time.formatted = "not a date".to_string();
        assert!(build_update(&meta).is_none());
    }

    #[test]
    fn update_includes_gps_only_when_both_coordinates_exist() {
        let update = build_update(&sidecar(Some("Trip"), Some(40.0), None)).unwrap();
        assert_eq!(update.gps_latitude, None);
        assert_eq!(update.gps_longitude, None);
    }
}
