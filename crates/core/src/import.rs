//! Parser for the semicolon-delimited bulk load format.
//!
//! Layout: a header row, then `id;name;meaning;origin;choice_reason;search_count`.
//! The legacy id is ignored. Fields may be wrapped in double quotes, with
//! embedded quotes doubled.

use crate::NewName;

const DELIMITER: char = ';';
const MIN_COLUMNS: usize = 5;

/// A row ready to be inserted by the bulk loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedName {
    pub name: NewName,
    pub search_count: u64,
}

/// Result of parsing a bulk load file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportBatch {
    pub rows: Vec<ImportedName>,
    /// Data rows skipped for having too few columns or an empty name.
    pub skipped: usize,
    /// The header row, as read.
    pub header: Option<Vec<String>>,
}

/// Parse the full file contents.
pub fn parse_import(input: &str) -> ImportBatch {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut batch = ImportBatch::default();
    let mut records = split_records(input).into_iter();
    batch.header = records.next();

    for fields in records {
        if fields.len() == 1 && fields[0].trim().is_empty() {
            continue;
        }
        match row_to_import(&fields) {
            Some(row) => batch.rows.push(row),
            None => batch.skipped += 1,
        }
    }
    batch
}

fn row_to_import(fields: &[String]) -> Option<ImportedName> {
    if fields.len() < MIN_COLUMNS {
        return None;
    }
    let name = fields[1].trim();
    if name.is_empty() {
        return None;
    }
    let choice_reason = fields[4].trim();
    let search_count = fields
        .get(5)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    Some(ImportedName {
        name: NewName {
            name: name.to_owned(),
            meaning: fields[2].trim().to_owned(),
            origin: fields[3].trim().to_owned(),
            choice_reason: (!choice_reason.is_empty()).then(|| choice_reason.to_owned()),
        },
        search_count,
    })
}

/// Split into records of fields, honouring quoted fields that span lines.
fn split_records(input: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                },
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            },
            DELIMITER => fields.push(std::mem::take(&mut field)),
            '\r' => {},
            '\n' => {
                fields.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut fields));
            },
            _ => field.push(c),
        }
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        records.push(fields);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_and_skips_header() {
        let input = "ID;Name;Meaning;Origin;Reason;Searches\n\
                     1;Ana;grace;Hebrew;family;4\n\
                     2;Bia;life;Latin;;\n";
        let batch = parse_import(input);
        assert_eq!(batch.header.as_ref().map(Vec::len), Some(6));
        assert_eq!(batch.rows.len(), 2);
        assert_eq!(batch.rows[0].name.name, "Ana");
        assert_eq!(batch.rows[0].search_count, 4);
        assert_eq!(batch.rows[1].name.choice_reason, None);
        assert_eq!(batch.rows[1].search_count, 0);
        assert_eq!(batch.skipped, 0);
    }

    #[test]
    fn short_rows_are_skipped() {
        let input = "h\n1;Ana;grace;Hebrew\n2;Bia;life;Latin;chosen\n";
        let batch = parse_import(input);
        assert_eq!(batch.rows.len(), 1);
        assert_eq!(batch.rows[0].name.name, "Bia");
        assert_eq!(batch.skipped, 1);
    }

    #[test]
    fn non_numeric_count_defaults_to_zero() {
        let batch = parse_import("h\n1;Ana;grace;Hebrew;x;lots\n2;Bia;l;L;y;-3\n");
        assert!(batch.rows.iter().all(|r| r.search_count == 0));
    }

    #[test]
    fn bom_and_crlf_are_handled() {
        let batch = parse_import("\u{feff}id;name;m;o;r;s\r\n1; Ana ;grace;Hebrew;r;2\r\n");
        assert_eq!(batch.header.unwrap()[0], "id");
        assert_eq!(batch.rows[0].name.name, "Ana");
        assert_eq!(batch.rows[0].search_count, 2);
    }

    #[test]
    fn quoted_fields_may_hold_delimiters_and_quotes() {
        let batch = parse_import("h\n1;\"Ana; Maria\";\"the \"\"gracious\"\"\";Hebrew;r;1\n");
        assert_eq!(batch.rows[0].name.name, "Ana; Maria");
        assert_eq!(batch.rows[0].name.meaning, "the \"gracious\"");
    }

    #[test]
    fn blank_lines_and_missing_trailing_newline() {
        let batch = parse_import("h\n\n1;Ana;g;H;r;1");
        assert_eq!(batch.rows.len(), 1);
        assert_eq!(batch.skipped, 0);
    }

    #[test]
    fn empty_name_is_skipped() {
        let batch = parse_import("h\n1;  ;g;H;r;1\n");
        assert!(batch.rows.is_empty());
        assert_eq!(batch.skipped, 1);
    }
}
