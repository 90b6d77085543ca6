use crate::error::ConvertError;
use tracing::debug;

/// Where the table starts inside the raw export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLocation<'a> {
    /// Number of metadata lines before the header row.
    pub skipped_lines: usize,
    /// The header row and everything after it.
    pub table: &'a str,
}

/// Finds the first line that starts with `marker` and returns the text from
/// that line onward. Everything before it is metadata.
///
/// Lines end at `\n`, `\r\n` or a bare `\r`.
pub fn locate_header<'a>(text: &'a str, marker: &str) -> Result<HeaderLocation<'a>, ConvertError> {
    let mut offset = 0;
    let mut idx = 0;
    while offset < text.len() {
        let rest = &text[offset..];
        if rest.starts_with(marker) {
            debug!(skipped = idx, "header row located");
            return Ok(HeaderLocation {
                skipped_lines: idx,
                table: rest,
            });
        }
        offset += next_line_start(rest.as_bytes());
        idx += 1;
    }

    Err(ConvertError::HeaderNotFound {
        marker: marker.to_string(),
    })
}

/// Byte length of the first line of `bytes`, terminator included.
fn next_line_start(bytes: &[u8]) -> usize {
    match bytes.iter().position(|&b| b == b'\n' || b == b'\r') {
        Some(p) if bytes[p] == b'\r' && bytes.get(p + 1) == Some(&b'\n') => p + 2,
        Some(p) => p + 1,
        None => bytes.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "latitude,longitude,elevation\n\
33.62,73.12,583.0\n\
\n\
time,temperature_2m (°C)\n\
2024-01-01T00:00,5.3\n";

    #[test]
    fn skips_metadata_lines() {
        let loc = locate_header(EXPORT, "time").unwrap();
        assert_eq!(loc.skipped_lines, 3);
        assert!(loc.table.starts_with("time,temperature_2m (°C)\n"));
        assert!(loc.table.ends_with("2024-01-01T00:00,5.3\n"));
    }

    #[test]
    fn header_on_first_line() {
        let loc = locate_header("time,a\n1,2", "time").unwrap();
        assert_eq!(loc.skipped_lines, 0);
        assert_eq!(loc.table, "time,a\n1,2");
    }

    #[test]
    fn marker_must_start_the_line() {
        // a leading space or a mid-line "time" is still metadata
        let text = " time,a\nutc_offset,time\nzone,GMT\n";
        let err = locate_header(text, "time").unwrap_err();
        assert!(matches!(err, ConvertError::HeaderNotFound { ref marker } if marker == "time"));
    }

    #[test]
    fn prefix_match_is_literal() {
        let loc = locate_header("meta\ntimezone,GMT\ntime,a\n", "time").unwrap();
        assert_eq!(loc.skipped_lines, 1);
        assert!(loc.table.starts_with("timezone,GMT\n"));
    }

    #[test]
    fn crlf_lines_are_handled() {
        let loc = locate_header("meta\r\ntime,a\r\n1,2\r\n", "time").unwrap();
        assert_eq!(loc.skipped_lines, 1);
        assert_eq!(loc.table, "time,a\r\n1,2\r\n");
    }

    #[test]
    fn cr_only_lines_are_handled() {
        let loc = locate_header("latitude,longitude\r33.62,73.12\rtime,a\r1,2\r", "time").unwrap();
        assert_eq!(loc.skipped_lines, 2);
        assert_eq!(loc.table, "time,a\r1,2\r");
    }

    #[test]
    fn mixed_line_endings() {
        let loc = locate_header("a\r\nb\rc\ntime,x\n", "time").unwrap();
        assert_eq!(loc.skipped_lines, 3);
        assert_eq!(loc.table, "time,x\n");
    }

    #[test]
    fn empty_input_has_no_header() {
        assert!(locate_header("", "time").is_err());
    }
}
