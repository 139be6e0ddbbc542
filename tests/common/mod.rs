#![allow(dead_code)]

use envtree::{Assignment, EnvMap, File, Statement, parse, parse_str};

pub fn parse_ok(input: &str) -> File {
    parse(input).unwrap_or_else(|e| panic!("parse failed: {e}\n--- input ---\n{input:?}"))
}

pub fn map_ok(input: &str) -> EnvMap {
    parse_str(input).unwrap_or_else(|e| panic!("parse failed: {e}\n--- input ---\n{input:?}"))
}

/// Assert that `input` parses to exactly one assignment.
pub fn assert_single(input: &str, name: &str, value: &str) {
    let file = parse_ok(input);
    assert_eq!(
        file.statements,
        vec![Statement::Assignment(Assignment::new(name, value))],
        "input: {input:?}"
    );
}

pub fn pairs(map: &EnvMap) -> Vec<(&str, &str)> {
    map.iter().collect()
}
