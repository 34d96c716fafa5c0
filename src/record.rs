//! Line parsing for prescription records.
//!
//! A line has the shape `id,last_name,first_name,drug_name,cost`. Any field may
//! be wrapped in double quotes to protect commas inside it, e.g.
//! `1063421576,"ABRAHAM, M.D.",CINI,"VENLAFAXINE HCL ER 5,000",389.04`.

use crate::cost::Cost;
use crate::error::ParseError;
use std::borrow::Cow;
use std::str::FromStr;

/// Number of fields in a well-formed line.
pub const FIELD_COUNT: usize = 5;

/// A prescription event ready for aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecord {
    /// Drug name exactly as written, with protecting quotes removed
    pub drug_name: String,

    /// Cost of this prescription
    pub cost: Cost,

    /// `first_name + "_" + last_name`
    pub prescriber_name: String,
}

/// Parses one line (terminator already stripped) into a record.
pub fn parse_line(line: &str) -> Result<ParsedRecord, ParseError> {
    let fields = split_fields(line);

    let [_id, last_name, first_name, drug_name, cost]: [Cow<'_, str>; FIELD_COUNT] = fields
        .try_into()
        .map_err(|fields: Vec<_>| ParseError::MalformedRecord {
            fields: fields.len(),
            line: line.to_string(),
        })?;

    let cost = Cost::from_str(&cost).map_err(|_| ParseError::InvalidCost {
        value: cost.to_string(),
        line: line.to_string(),
    })?;

    Ok(ParsedRecord {
        drug_name: drug_name.into_owned(),
        cost,
        prescriber_name: format!("{}_{}", first_name, last_name),
    })
}

/// Splits a line into fields.
///
/// Lines without any quote character take a plain comma split and borrow from
/// the input. Otherwise the line is scanned with [`split_quoted`].
pub fn split_fields(line: &str) -> Vec<Cow<'_, str>> {
    if line.contains('"') {
        split_quoted(line).into_iter().map(Cow::Owned).collect()
    } else {
        line.split(',').map(Cow::Borrowed).collect()
    }
}

/// Quote-aware split.
///
/// Each `"` toggles the in-quotes state and is dropped. A comma separates fields
/// only outside quotes; inside quotes it is kept as text.
pub fn split_quoted(line: &str) -> Vec<String> {
    let mut fields = Vec::with_capacity(FIELD_COUNT);
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(drug: &str, cost: &str, prescriber: &str) -> ParsedRecord {
        ParsedRecord {
            drug_name: drug.to_string(),
            cost: Cost::from_str(cost).unwrap(),
            prescriber_name: prescriber.to_string(),
        }
    }

    #[test]
    fn test_parse_plain_line() {
        let parsed = parse_line("1063421576,ABRAHAM,CINI,VENLAFAXINE HCL ER,389.04").unwrap();
        assert_eq!(parsed, record("VENLAFAXINE HCL ER", "389.04", "CINI_ABRAHAM"));
    }

    #[test]
    fn test_parse_quoted_last_name() {
        let parsed =
            parse_line(r#"1063421576,"ABRAHAM, M.D.",CINI,VENLAFAXINE HCL ER,389.04"#).unwrap();
        assert_eq!(
            parsed,
            record("VENLAFAXINE HCL ER", "389.04", "CINI_ABRAHAM, M.D.")
        );
    }

    #[test]
    fn test_parse_quoted_name_and_drug() {
        let parsed = parse_line(
            r#"1063421576,"ABRAHAM, M.D.",CINI,"VENLAFAXINE HCL ER 5,000",389.04"#,
        )
        .unwrap();
        assert_eq!(
            parsed,
            record("VENLAFAXINE HCL ER 5,000", "389.04", "CINI_ABRAHAM, M.D.")
        );
    }

    #[test]
    fn test_parse_quoted_cost() {
        let parsed = parse_line(r#"1,Smith,James,AMBIEN,"100.50""#).unwrap();
        assert_eq!(parsed.cost, Cost::from_str("100.5").unwrap());
    }

    #[test]
    fn test_rejects_non_numeric_cost() {
        let line = r#"1063421576,"ABRAHAM, M.D.",CINI,VENLAFAXINE HCL ER 5,cost_not_float"#;
        let err = parse_line(line).unwrap_err();
        assert!(matches!(err, ParseError::InvalidCost { ref value, .. } if value == "cost_not_float"));
    }

    #[test]
    fn test_rejects_wrong_field_count() {
        let line = r#"1063421576,"ABRAHAM, M.D.","CINI,VENLAFAXINE HCL ER 5,000",cost_not_float"#;
        assert_eq!(
            parse_line(line).unwrap_err(),
            ParseError::MalformedRecord {
                fields: 4,
                line: line.to_string(),
            }
        );

        let err = parse_line("1,Smith,James,AMBIEN,100,extra").unwrap_err();
        assert!(matches!(err, ParseError::MalformedRecord { fields: 6, .. }));
    }

    #[test]
    fn test_blank_line_is_malformed() {
        assert!(matches!(
            parse_line("").unwrap_err(),
            ParseError::MalformedRecord { fields: 1, .. }
        ));
    }

    #[test]
    fn test_quote_aware_split_matches_fast_path_without_quotes() {
        let line = "1000000001,Smith,James,AMBIEN,100";
        let fast: Vec<String> = split_fields(line).into_iter().map(Cow::into_owned).collect();
        assert_eq!(fast, split_quoted(line));
        assert!(split_fields(line)
            .iter()
            .all(|f| matches!(f, Cow::Borrowed(_))));
    }

    #[test]
    fn test_split_quoted_keeps_empty_fields() {
        assert_eq!(split_quoted(r#""",,a"#), vec!["", "", "a"]);
    }

    #[test]
    fn test_unbalanced_quote_swallows_rest_of_line() {
        // An opening quote with no partner protects every later comma.
        assert_eq!(
            split_quoted(r#"1,"Smith,James,AMBIEN,100"#),
            vec!["1", "Smith,James,AMBIEN,100"]
        );
    }
}
