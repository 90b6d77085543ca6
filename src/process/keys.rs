/// Unit suffixes of the export and their abbreviations, applied in order.
pub const UNIT_SUFFIXES: [(&str, &str); 5] = [
    (" (°C)", "_C"),
    (" (%)", "_percent"),
    (" (mm)", "_mm"),
    (" (hPa)", "_hPa"),
    (" (m)", "_m"),
];

/// Normalize a column header: `relative_humidity_2m (%)` becomes
/// `relative_humidity_2m_percent`. Headers without a known unit only have
/// their spaces turned into underscores.
pub fn clean_key(raw: &str) -> String {
    let mut key = raw.to_string();
    for (suffix, abbrev) in UNIT_SUFFIXES {
        key = key.replace(suffix, abbrev);
    }
    key.replace(' ', "_").trim().to_string()
}
