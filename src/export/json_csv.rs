// src/export/json_csv.rs

use crate::errors::AppResult;
use crate::export::notify_export_success;
use crate::store::Record;
use crate::ui::messages::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Export JSON pretty-printed.
pub(crate) fn export_json(records: &[Record], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(records)?;
    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Export CSV to `path`.
pub(crate) fn export_csv(records: &[Record], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let file = BufWriter::new(File::create(path)?);
    write_csv(records, file)?;

    notify_export_success("CSV", path);
    Ok(())
}

/// Write `records` as spreadsheet-friendly CSV: UTF-8 BOM, `;` separator,
/// header row taken from the first record. Fields holding `;`, `"` or a
/// line break are quoted with inner quotes doubled.
pub fn write_csv<W: Write>(records: &[Record], mut out: W) -> AppResult<()> {
    out.write_all(UTF8_BOM)?;

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    let Some(first) = records.first() else {
        wtr.flush()?;
        return Ok(());
    };
    let headers: Vec<&str> = first.keys().collect();
    wtr.write_record(&headers)?;

    for record in records {
        wtr.write_record(headers.iter().map(|h| record.get(h)))?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_only_when_needed() {
        let mut r = Record::new();
        r.set("id", "OS-1");
        r.set("notes", "say \"hi\"; then\nleave");
        r.set("sector", "Pool");

        let mut buf = Vec::new();
        write_csv(&[r], &mut buf).unwrap();

        assert!(buf.starts_with(UTF8_BOM));
        let text = String::from_utf8(buf[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(
            text,
            "id;notes;sector\nOS-1;\"say \"\"hi\"\"; then\nleave\";Pool\n"
        );
    }
}
