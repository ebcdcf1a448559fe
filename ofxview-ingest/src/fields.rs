//! Per-transaction field lookup.
//!
//! Every STMTTRN field we read is listed once in [`FIELD_TAGS`]; extraction walks the
//! table and keeps the first value of each tag. Adding a field means adding a row.

use std::sync::LazyLock;

use crate::scan::TagRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Posted,
    Amount,
    Name,
    Memo,
}

pub const FIELD_TAGS: &[(Field, &str)] = &[
    (Field::Id, "FITID"),
    (Field::Posted, "DTPOSTED"),
    (Field::Amount, "TRNAMT"),
    (Field::Name, "NAME"),
    (Field::Memo, "MEMO"),
];

static FIELD_RULES: LazyLock<Vec<(Field, TagRule)>> = LazyLock::new(|| {
    FIELD_TAGS
        .iter()
        .map(|&(field, tag)| (field, TagRule::new(tag)))
        .collect()
});

/// Raw (trimmed) field values found in one segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentFields<'t> {
    pub id: Option<&'t str>,
    pub posted: Option<&'t str>,
    pub amount: Option<&'t str>,
    pub name: Option<&'t str>,
    pub memo: Option<&'t str>,
}

impl<'t> SegmentFields<'t> {
    pub fn extract(segment: &'t str) -> Self {
        let mut out = SegmentFields::default();
        for (field, rule) in FIELD_RULES.iter() {
            let value = rule.first(segment);
            match field {
                Field::Id => out.id = value,
                Field::Posted => out.posted = value,
                Field::Amount => out.amount = value,
                Field::Name => out.name = value,
                Field::Memo => out.memo = value,
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_sgml_segment() {
        let seg = "<STMTTRN>\n<TRNTYPE>DEBIT\n<DTPOSTED>20240115120000[-3:BRT]\n<TRNAMT>-50.00\n<FITID>T1\n<NAME>Coffee\n</STMTTRN>";
        let f = SegmentFields::extract(seg);
        assert_eq!(f.id, Some("T1"));
        assert_eq!(f.posted, Some("20240115120000[-3:BRT]"));
        assert_eq!(f.amount, Some("-50.00"));
        assert_eq!(f.name, Some("Coffee"));
        assert_eq!(f.memo, None);
    }

    #[test]
    fn test_first_match_wins_inside_segment() {
        let seg = "<STMTTRN><MEMO>one</MEMO><memo>two</memo></STMTTRN>";
        let f = SegmentFields::extract(seg);
        assert_eq!(f.memo, Some("one"));
    }

    #[test]
    fn test_every_field_has_a_tag() {
        for field in [Field::Id, Field::Posted, Field::Amount, Field::Name, Field::Memo] {
            assert!(FIELD_TAGS.iter().any(|(f, _)| *f == field), "{field:?} has no tag");
        }
    }
}
