//! CSV export of name records.
//!
//! Comma separated, CRLF line endings, fields quoted only when they contain a
//! comma, a double quote or a line break.

use crate::NameRecord;

pub const EXPORT_HEADER: [&str; 5] = ["Name", "Meaning", "Origin", "ChoiceReason", "SearchCount"];

/// Render all records, header first, one row per record in the order given.
pub fn to_csv(records: &[NameRecord]) -> String {
    let mut out = String::new();
    write_row(&mut out, EXPORT_HEADER);
    for r in records {
        let count = r.search_count.to_string();
        write_row(
            &mut out,
            [
                r.name.as_str(),
                r.meaning.as_str(),
                r.origin.as_str(),
                r.choice_reason.as_deref().unwrap_or(""),
                count.as_str(),
            ],
        );
    }
    out
}

fn write_row<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push_str("\r\n");
}

fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\n', '\r']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, name: &str, reason: Option<&str>, count: u64) -> NameRecord {
        NameRecord {
            id,
            name: name.to_owned(),
            meaning: "m".to_owned(),
            origin: "o".to_owned(),
            choice_reason: reason.map(str::to_owned),
            search_count: count,
        }
    }

    #[test]
    fn header_only_for_no_records() {
        assert_eq!(to_csv(&[]), "Name,Meaning,Origin,ChoiceReason,SearchCount\r\n");
    }

    #[test]
    fn empty_choice_reason_keeps_all_columns() {
        let csv = to_csv(&[record(1, "Ana", None, 3)]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "Ana,m,o,,3");
        assert_eq!(row.split(',').count(), 5);
    }

    #[test]
    fn one_row_per_record_in_order() {
        let csv = to_csv(&[record(2, "Ana", Some("x"), 0), record(1, "Bia", None, 1)]);
        let names: Vec<_> =
            csv.lines().skip(1).map(|l| l.split(',').next().unwrap().to_owned()).collect();
        assert_eq!(names, ["Ana", "Bia"]);
    }

    #[test]
    fn special_characters_are_quoted() {
        let mut r = record(1, "Ana", Some("said \"yes\", twice"), 0);
        r.meaning = "line\nbreak".to_owned();
        let csv = to_csv(&[r]);
        assert!(csv.contains("\"said \"\"yes\"\", twice\""));
        assert!(csv.contains("\"line\nbreak\""));
    }
}
