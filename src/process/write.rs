use crate::error::ConvertError;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::debug;

/// Render `rows` as a JSON array indented by `indent` spaces, with a trailing
/// newline.
pub fn render_json<T: Serialize>(rows: &[T], indent: usize) -> Result<Vec<u8>, ConvertError> {
    let pad = vec![b' '; indent];
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&pad));
    rows.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Write the dataset to `path`, replacing whatever is there.
///
/// The document is written to a hidden sibling first and renamed into place,
/// so `path` is either the previous file or the complete new one.
pub fn write_dataset<T: Serialize>(
    path: &Path,
    rows: &[T],
    indent: usize,
) -> Result<(), ConvertError> {
    let bytes = render_json(rows, indent)?;
    let out_err = |e| ConvertError::OutputWrite(path.to_path_buf(), e);

    let tmp_path = tmp_sibling(path);
    let mut tmp = fs::File::create(&tmp_path).map_err(out_err)?;
    let written = tmp.write_all(&bytes).and_then(|_| tmp.sync_all());
    drop(tmp);

    if let Err(e) = written.and_then(|_| fs::rename(&tmp_path, path)) {
        let _ = fs::remove_file(&tmp_path);
        return Err(out_err(e));
    }

    debug!(path = %path.display(), bytes = bytes.len(), "wrote dataset");
    Ok(())
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn four_space_layout() -> Result<()> {
        let rows = vec![json!({"rain_mm": 0.5, "time": "t0"})];
        let text = String::from_utf8(render_json(&rows, 4)?)?;
        assert_eq!(
            text,
            "[\n    {\n        \"rain_mm\": 0.5,\n        \"time\": \"t0\"\n    }\n]\n"
        );
        Ok(())
    }

    #[test]
    fn empty_dataset_is_empty_array() -> Result<()> {
        let rows: Vec<serde_json::Value> = Vec::new();
        assert_eq!(render_json(&rows, 4)?, b"[]\n");
        Ok(())
    }

    #[test]
    fn overwrites_existing_file_and_leaves_no_tmp() -> Result<()> {
        let dir = tempdir()?;
        let out = dir.path().join("clean_output.json");
        fs::write(&out, "stale contents that are longer than the new file")?;

        write_dataset(&out, &[json!({"a": 1.0})], 4)?;

        let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out)?)?;
        assert_eq!(parsed, json!([{"a": 1.0}]));
        assert_eq!(fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }

    #[test]
    fn unwritable_destination_is_output_error() -> Result<()> {
        let dir = tempdir()?;
        let out = dir.path().join("missing_dir").join("out.json");
        let err = write_dataset(&out, &[json!({})], 4).unwrap_err();
        assert!(matches!(err, ConvertError::OutputWrite(ref p, _) if *p == out));
        assert!(!out.exists());
        Ok(())
    }
}
