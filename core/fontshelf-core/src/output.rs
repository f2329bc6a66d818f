//! Streaming output helpers (made by FontLab https://www.fontlab.com/)

use std::io::Write;

use anyhow::Result;

use crate::catalog::FontRecord;

/// Write records as a prettified JSON array.
pub fn write_json_pretty(records: &[&FontRecord], mut w: impl Write) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    w.write_all(json.as_bytes())?;
    w.write_all(b"\n")?;
    Ok(())
}

/// Write records as newline-delimited JSON (NDJSON).
pub fn write_ndjson(records: &[&FontRecord], mut w: impl Write) -> Result<()> {
    for record in records {
        let line = serde_json::to_string(record)?;
        w.write_all(line.as_bytes())?;
        w.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn ndjson_writes_one_line_per_record() {
        let catalog = Catalog::sample();
        let records: Vec<&FontRecord> = catalog.iter().take(2).collect();
        let mut buf = Vec::new();

        write_ndjson(&records, &mut buf).expect("write ndjson");

        let text = String::from_utf8(buf).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: FontRecord = serde_json::from_str(lines[1]).expect("parse");
        assert_eq!(parsed.name, "Open Sans");
    }

    #[test]
    fn json_pretty_is_an_array() {
        let catalog = Catalog::sample();
        let records: Vec<&FontRecord> = catalog.iter().take(3).collect();
        let mut buf = Vec::new();

        write_json_pretty(&records, &mut buf).expect("write json");

        let parsed: Vec<FontRecord> = serde_json::from_slice(&buf).expect("parse");
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[2].id, 3);
    }
}
