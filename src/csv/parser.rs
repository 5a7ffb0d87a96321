use crate::error::Error;
use crate::image::SettingsEntry;

#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    name: String,
    value: String,
}

/// Parse `name,value` CSV content into settings entries, keeping row order.
///
/// Fields are trimmed and lines starting with `#` are skipped.
pub(crate) fn parse_csv(content: &str) -> Result<Vec<SettingsEntry>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(content.as_bytes());

    let mut entries = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        entries.push(SettingsEntry::from_hex(row.name, &row.value)?);
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_in_order() {
        let content = "name,value\n# public key\nairtag/public_key, 0011\nfoo,deadbeef\n";
        let entries = parse_csv(content).unwrap();

        assert_eq!(
            entries,
            vec![
                SettingsEntry::new("airtag/public_key", vec![0x00, 0x11]),
                SettingsEntry::new("foo", vec![0xDE, 0xAD, 0xBE, 0xEF]),
            ]
        );
    }

    #[test]
    fn header_only_is_empty() {
        assert!(parse_csv("name,value\n").unwrap().is_empty());
    }

    #[test]
    fn rejects_bad_hex() {
        let result = parse_csv("name,value\nfoo,zz\n");
        assert!(matches!(result, Err(Error::HexError(_))));
    }

    #[test]
    fn rejects_missing_column() {
        let result = parse_csv("name\nfoo\n");
        assert!(matches!(result, Err(Error::CsvError(_))));
    }
}
