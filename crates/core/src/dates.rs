use chrono::NaiveDateTime;

/// Sidecar timestamps come formatted for humans: "6 Aug 2021, 14:30".
const SIDECAR_FORMAT: &str = "%d %b %Y, %H:%M";
/// Embedded tags carry colon-separated dates with seconds.
const TAG_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Rewrite a sidecar timestamp into tag form, minute precision padded
/// with ":00" seconds. Anything unparsable yields `None`.
pub fn format_tag_date(raw: &str) -> Option<String> {
    NaiveDateTime::parse_from_str(raw, SIDECAR_FORMAT)
        .ok()
        .map(|dt| dt.format(TAG_FORMAT).to_string())
}
