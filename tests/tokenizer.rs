use csv_mapper::ImportError;
use csv_mapper::tokenizer::{is_delimited_line, split_line, tokenize};
use proptest::prelude::*;

fn owned(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

#[test]
fn tokenize_keeps_only_delimited_lines() {
    let content = "name,age\n\n# exported by tool\nAlice,30\n,\nBob,\nCarol,41\n";
    let table = tokenize(content, ",").unwrap();
    assert_eq!(
        table.rows(),
        &[
            owned(&["name", "age"]),
            owned(&["Alice", "30"]),
            owned(&["Carol", "41"]),
        ]
    );
    assert_eq!(table.header().unwrap(), &owned(&["name", "age"])[..]);
    assert_eq!(table.data_rows().len(), 2);
}

#[test]
fn tokenize_handles_crlf_line_endings() {
    let table = tokenize("a,b\r\n1,2\r\n", ",").unwrap();
    assert_eq!(table.rows(), &[owned(&["a", "b"]), owned(&["1", "2"])]);
}

#[test]
fn tokenize_strips_quotes_and_padding() {
    let table = tokenize("\"first name\" ,\"age\"\n  \"Alice\",30 \n", ",").unwrap();
    // The space before the first comma makes it literal text.
    assert_eq!(table.rows()[0], owned(&["first name ,age"]));
    assert_eq!(table.rows()[1], owned(&["Alice", "30"]));
}

#[test]
fn tokenize_splits_inside_quoted_values() {
    let table = tokenize("x,y\n\"a,b\",5\n", ",").unwrap();
    assert_eq!(table.rows()[1], owned(&["a", "b", "5"]));
}

#[test]
fn tokenize_supports_multi_character_delimiters() {
    let table = tokenize("id||name\n7||Ann\n", "||").unwrap();
    assert_eq!(table.rows(), &[owned(&["id", "name"]), owned(&["7", "Ann"])]);
}

#[test]
fn tokenize_drops_trailing_empty_fields() {
    let table = tokenize("a,b\n1,2,\n3,,\n", ",").unwrap();
    assert_eq!(
        table.rows(),
        &[owned(&["a", "b"]), owned(&["1", "2"]), owned(&["3"])]
    );
}

#[test]
fn header_ending_in_delimiter_has_no_blank_column() {
    let table = tokenize("a,b,\n1,2\n", ",").unwrap();
    assert_eq!(table.header().unwrap(), &owned(&["a", "b"])[..]);
}

#[test]
fn inner_empty_fields_are_kept() {
    assert_eq!(split_line("1,,3", ","), owned(&["1", "", "3"]));
    assert_eq!(split_line("1,2,\"\"", ","), owned(&["1", "2", ""]));
}

#[test]
fn tokenize_rejects_empty_delimiter() {
    assert!(matches!(tokenize("a,b", ""), Err(ImportError::Config(_))));
}

#[test]
fn tokenize_of_empty_content_is_empty() {
    let table = tokenize("", ",").unwrap();
    assert!(table.is_empty());
    assert!(table.header().is_none());
    assert!(table.data_rows().is_empty());
}

#[test]
fn split_line_treats_spaced_delimiter_as_text() {
    assert_eq!(split_line("Smith , John,42", ","), owned(&["Smith , John", "42"]));
    assert_eq!(split_line("a;b; c", ";"), owned(&["a", "b; c"]));
}

proptest! {
    #[test]
    fn lines_without_delimiter_are_never_retained(line in "[a-z ;|]{0,20}") {
        prop_assert!(!is_delimited_line(&line, ","));
        prop_assert!(tokenize(&line, ",").unwrap().is_empty());
    }

    #[test]
    fn plain_fields_round_trip_through_split(
        fields in proptest::collection::vec("[A-Za-z0-9_]{1,8}", 2..6)
    ) {
        let line = fields.join(",");
        prop_assert_eq!(split_line(&line, ","), fields);
    }

    #[test]
    fn tokens_never_carry_quotes_or_padding(line in "[a-z \",]{0,30}") {
        for token in split_line(&line, ",") {
            prop_assert!(!token.contains('"'));
            prop_assert_eq!(token.trim(), token.as_str());
        }
    }
}
