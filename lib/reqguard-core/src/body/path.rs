//! Nested path assignment for structured JSON bodies.
//!
//! A parameter name such as `user.addresses[0]["zip.code"]` addresses a nested
//! location. Segments are separated by dots; brackets hold either an index or a
//! quoted key that may contain dots.

use serde_json::{Map, Value};

/// Indexes above this value are treated as object keys.
const MAX_ARRAY_INDEX: usize = 10_000;

/// Maximum number of nested levels created by a single path.
pub(crate) const MAX_PATH_DEPTH: usize = 64;

/// Splits a path into its segments.
///
/// An empty path is a single empty key; empty segments between dots are kept.
pub(crate) fn parse_path(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut pending = true;
    let mut chars = path.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '.' => {
                segments.push(std::mem::take(&mut current));
                pending = true;
            }
            '[' => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
                segments.push(parse_bracket(&mut chars));
                if chars.peek() == Some(&'.') {
                    chars.next();
                }
                pending = chars.peek().is_some();
            }
            _ => {
                current.push(ch);
                pending = true;
            }
        }
    }

    if pending || !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Reads a bracket segment, the opening `[` being already consumed.
fn parse_bracket(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut segment = String::new();

    if let Some(&quote) = chars.peek().filter(|ch| **ch == '"' || **ch == '\'') {
        chars.next();
        while let Some(ch) = chars.next() {
            match ch {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        segment.push(escaped);
                    }
                }
                _ if ch == quote => break,
                _ => segment.push(ch),
            }
        }
        // skip anything up to the closing bracket
        for ch in chars.by_ref() {
            if ch == ']' {
                break;
            }
        }
        return segment;
    }

    for ch in chars.by_ref() {
        if ch == ']' {
            break;
        }
        segment.push(ch);
    }
    segment
}

/// Parses an array index: `0` or a number without leading zero.
fn parse_index(segment: &str) -> Option<usize> {
    let valid = segment == "0"
        || (!segment.is_empty()
            && !segment.starts_with('0')
            && segment.bytes().all(|byte| byte.is_ascii_digit()));
    if !valid {
        return None;
    }
    segment
        .parse::<usize>()
        .ok()
        .filter(|index| *index <= MAX_ARRAY_INDEX)
}

/// Assigns `value` at `path` inside `target`, creating intermediate containers.
///
/// An intermediate container is an array when the next segment is an index,
/// an object otherwise. Scalars found on the way are replaced; an array met by
/// a non-index segment becomes an object keyed by its indexes.
///
/// Paths deeper than [`MAX_PATH_DEPTH`] keep their trailing segments joined
/// with dots as a single key.
pub(crate) fn assign_path(target: &mut Map<String, Value>, path: &str, value: Value) {
    let mut segments = parse_path(path);
    if segments.len() > MAX_PATH_DEPTH {
        let tail = segments.split_off(MAX_PATH_DEPTH - 1).join(".");
        segments.push(tail);
    }
    let Some((first, rest)) = segments.split_first() else {
        return;
    };

    let mut slot = target.entry(first.clone()).or_insert(Value::Null);
    for segment in rest {
        let Some(child) = child_slot(slot, segment) else {
            return;
        };
        slot = child;
    }
    *slot = value;
}

fn child_slot<'a>(slot: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    let index = parse_index(segment);

    let is_container = slot.is_object() || (index.is_some() && slot.is_array());
    if !is_container {
        *slot = match (index, slot.take()) {
            (Some(_), _) => Value::Array(Vec::new()),
            (None, Value::Array(items)) => Value::Object(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(idx, item)| (idx.to_string(), item))
                    .collect(),
            ),
            (None, _) => Value::Object(Map::new()),
        };
    }

    match slot {
        Value::Object(map) => Some(map.entry(segment.to_owned()).or_insert(Value::Null)),
        Value::Array(items) => {
            let index = index?;
            if index >= items.len() {
                items.resize(index + 1, Value::Null);
            }
            items.get_mut(index)
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case("a", &["a"])]
    #[case("a.b.c", &["a", "b", "c"])]
    #[case("a[0].b", &["a", "0", "b"])]
    #[case("a[0][1]", &["a", "0", "1"])]
    #[case("[0]", &["0"])]
    #[case("a['x.y']", &["a", "x.y"])]
    #[case(r#"a["x.y"].z"#, &["a", "x.y", "z"])]
    #[case(r#"a["q\"t"]"#, &["a", "q\"t"])]
    #[case("a..b", &["a", "", "b"])]
    #[case("a.", &["a", ""])]
    #[case(".a", &["", "a"])]
    #[case("", &[""])]
    fn should_parse_path(#[case] path: &str, #[case] expected: &[&str]) {
        assert_eq!(parse_path(path), expected);
    }

    #[rstest]
    #[case("0", Some(0))]
    #[case("42", Some(42))]
    #[case("042", None)]
    #[case("-1", None)]
    #[case("1e3", None)]
    #[case("", None)]
    #[case("10001", None)]
    fn should_parse_index(#[case] segment: &str, #[case] expected: Option<usize>) {
        assert_eq!(parse_index(segment), expected);
    }

    fn assign_all(entries: &[(&str, Value)]) -> Value {
        let mut target = Map::new();
        for (path, value) in entries {
            assign_path(&mut target, path, value.clone());
        }
        Value::Object(target)
    }

    #[test]
    fn should_create_nested_objects() {
        let result = assign_all(&[("a.b.c", json!("1")), ("a.d", json!("2"))]);

        assert_eq!(result, json!({ "a": { "b": { "c": "1" }, "d": "2" } }));
    }

    #[test]
    fn should_create_arrays_for_indexes() {
        let result = assign_all(&[("items[1].id", json!("x"))]);

        assert_eq!(result, json!({ "items": [null, { "id": "x" }] }));
    }

    #[test]
    fn should_overwrite_later_assignment() {
        let result = assign_all(&[("a.b", json!("1")), ("a.b", json!("2"))]);

        assert_eq!(result, json!({ "a": { "b": "2" } }));
    }

    #[test]
    fn should_replace_scalar_with_container() {
        let result = assign_all(&[("a", json!("scalar")), ("a.b", json!("nested"))]);

        assert_eq!(result, json!({ "a": { "b": "nested" } }));
    }

    #[test]
    fn should_replace_container_with_scalar() {
        let result = assign_all(&[("a.b", json!("nested")), ("a", json!("scalar"))]);

        assert_eq!(result, json!({ "a": "scalar" }));
    }

    #[test]
    fn should_turn_array_into_object_for_key_segment() {
        let result = assign_all(&[("a[0]", json!("first")), ("a.name", json!("named"))]);

        assert_eq!(result, json!({ "a": { "0": "first", "name": "named" } }));
    }

    #[test]
    fn should_keep_numeric_keys_on_objects() {
        let result = assign_all(&[("a.name", json!("named")), ("a[0]", json!("first"))]);

        assert_eq!(result, json!({ "a": { "name": "named", "0": "first" } }));
    }

    #[test]
    fn should_treat_root_index_as_key() {
        let result = assign_all(&[("[0]", json!("zero"))]);

        assert_eq!(result, json!({ "0": "zero" }));
    }

    #[test]
    fn should_cap_depth_of_long_paths() {
        let path = vec!["a"; 20_000].join(".");

        let result = assign_all(&[(path.as_str(), json!("v"))]);

        let mut depth = 0;
        let mut current = &result;
        while let Value::Object(map) = current {
            let Some((key, child)) = map.iter().next() else {
                break;
            };
            depth += 1;
            if depth == MAX_PATH_DEPTH {
                assert_eq!(key.split('.').count(), 20_000 - (MAX_PATH_DEPTH - 1));
            }
            current = child;
        }
        assert_eq!(depth, MAX_PATH_DEPTH);
        assert_eq!(current, &json!("v"));
    }

    #[test]
    fn should_keep_quoted_dots_in_key() {
        let result = assign_all(&[("headers['x.y']", json!("1"))]);

        assert_eq!(result, json!({ "headers": { "x.y": "1" } }));
    }
}
