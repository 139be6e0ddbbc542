//! Scanner token stream tests.

use envtree::{EncodingErrorKind, Scanner, TokenKind, tokenize};

fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input)
        .expect("tokenize")
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

// -----------------------------------------------------------
// Token sequences.
// -----------------------------------------------------------

#[test]
fn scan_file_with_comment_and_values() {
    let input = "# header\nA=1\nB=\"two\"\nC='three'\n";
    assert_eq!(
        kinds(input),
        vec![
            TokenKind::Comment,
            TokenKind::NewLine,
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::Value,
            TokenKind::NewLine,
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::Value,
            TokenKind::NewLine,
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::RawValue,
            TokenKind::NewLine,
        ]
    );
}

#[test]
fn scan_naked_name() {
    assert_eq!(kinds("NAME"), vec![TokenKind::Identifier]);
    assert_eq!(kinds("NAME="), vec![TokenKind::Identifier, TokenKind::Assign]);
}

#[test]
fn scan_value_with_equals() {
    let tokens = tokenize("FOO=foobar=").expect("tokenize");
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[2].literal, "foobar=");
}

#[test]
fn scan_inline_hash_is_part_of_unquoted_value() {
    let tokens = tokenize("FOO=bar # not a comment").expect("tokenize");
    assert_eq!(tokens[2].kind, TokenKind::Value);
    assert_eq!(tokens[2].literal, "bar # not a comment");
}

#[test]
fn scan_space_after_assign() {
    assert_eq!(
        kinds("FOO= bar"),
        vec![
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::Space,
            TokenKind::Illegal,
            TokenKind::Illegal,
            TokenKind::Illegal,
        ]
    );
}

#[test]
fn scan_character_after_closing_quote_is_illegal() {
    let tokens = tokenize("A='x'y").expect("tokenize");
    assert_eq!(tokens[2].kind, TokenKind::RawValue);
    assert_eq!(tokens[3].kind, TokenKind::Illegal);
    assert_eq!(tokens[3].literal, "y");
    assert_eq!(tokens[3].offset, 5);
}

#[test]
fn scan_non_identifier_at_line_start() {
    let tokens = tokenize("$A=1").expect("tokenize");
    assert_eq!(tokens[0].kind, TokenKind::Illegal);
    assert_eq!(tokens[0].literal, "$");
}

#[test]
fn scan_multibyte_illegal_is_one_scalar() {
    let tokens = tokenize(" é").expect("tokenize");
    assert_eq!(tokens[1].kind, TokenKind::Illegal);
    assert_eq!(tokens[1].literal, "é");
    assert_eq!(tokens[1].length, 2);
}

// -----------------------------------------------------------
// Quoting and escapes.
// -----------------------------------------------------------

#[test]
fn double_quoted_tab_is_resolved() {
    let tokens = tokenize(r#"FOO="a\tb""#).expect("tokenize");
    assert_eq!(tokens[2].literal, "a\tb");
}

#[test]
fn single_quoted_tab_is_raw() {
    let tokens = tokenize(r"FOO='a\tb'").expect("tokenize");
    assert_eq!(tokens[2].literal, "a\\tb");
}

#[test]
fn single_quoted_backslash_before_quote() {
    let tokens = tokenize(r"FOO='a\'").expect("tokenize");
    assert_eq!(tokens[2].kind, TokenKind::RawValue);
    assert_eq!(tokens[2].literal, "a\\");
}

#[test]
fn quotes_of_other_kind_are_plain() {
    let tokens = tokenize(r#"A="'d'"
B='"e"'"#)
    .expect("tokenize");
    assert_eq!(tokens[2].literal, "'d'");
    assert_eq!(tokens[6].literal, "\"e\"");
}

#[test]
fn hash_inside_quotes() {
    let tokens = tokenize("A=\"b#c\"").expect("tokenize");
    assert_eq!(tokens[2].kind, TokenKind::Value);
    assert_eq!(tokens[2].literal, "b#c");
}

#[test]
fn unterminated_single_quote() {
    let tokens = tokenize("A='abc").expect("tokenize");
    assert_eq!(tokens[2].kind, TokenKind::Illegal);
    assert_eq!(tokens[2].literal, "abc");
}

#[test]
fn backslash_at_end_of_input() {
    let tokens = tokenize("A=\"abc\\").expect("tokenize");
    assert_eq!(tokens[2].kind, TokenKind::Illegal);
}

#[test]
fn empty_quoted_values() {
    let tokens = tokenize("A=\"\"\nB=''").expect("tokenize");
    assert_eq!(tokens[2].kind, TokenKind::Value);
    assert_eq!(tokens[2].literal, "");
    assert_eq!(tokens[6].kind, TokenKind::RawValue);
    assert_eq!(tokens[6].literal, "");
}

// -----------------------------------------------------------
// Offsets and encoding.
// -----------------------------------------------------------

#[test]
fn offsets_point_at_literal_start() {
    let tokens = tokenize("# c\nNAME=\"v\"").expect("tokenize");
    let offsets: Vec<_> = tokens.iter().map(|t| (t.offset, t.length)).collect();
    assert_eq!(offsets, vec![(0, 3), (3, 1), (4, 4), (8, 1), (10, 1)]);
}

#[test]
fn scanner_stops_iterating_at_end() {
    let mut scanner = Scanner::new("A").expect("scanner");
    assert!(scanner.next().is_some());
    assert!(scanner.next().is_none());
    assert!(scanner.next().is_none());
}

#[test]
fn bom_only_at_start() {
    assert!(Scanner::new("\u{FEFF}").is_ok());
    let err = Scanner::new("A=\u{FEFF}").unwrap_err();
    assert_eq!(err.kind, EncodingErrorKind::MisplacedByteOrderMark);
    assert_eq!(err.offset, 2);
}

#[test]
fn double_bom_is_rejected() {
    let err = Scanner::new("\u{FEFF}\u{FEFF}A").unwrap_err();
    assert_eq!(err.offset, 3);
}

#[test]
fn identifier_allowed_after_bom() {
    let tokens = tokenize("\u{FEFF}KEY").expect("tokenize");
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].literal, "KEY");
}
