//! Deep substring redaction of known secrets.

use serde_json::Value;

use crate::constants::PLACEHOLDER;
use crate::secrets::{Secret, SecretSet};

/// Upper bound of replacement passes over a single string.
const MAX_SCRUB_PASSES: usize = 8;

/// Replaces every occurrence of every secret in `text`, in set order.
///
/// Passes repeat while a replacement reveals a secret that was already
/// processed. Secrets contained in the placeholder are only applied once.
pub(crate) fn scrub_str(text: &mut String, secrets: &SecretSet) {
    let mut changed = replace_secrets(text, secrets.iter());
    let mut passes = 1;
    while changed && passes < MAX_SCRUB_PASSES {
        let stable = secrets
            .iter()
            .filter(|secret| !PLACEHOLDER.contains(secret.as_str()));
        changed = replace_secrets(text, stable);
        passes += 1;
    }
}

fn replace_secrets<'a>(text: &mut String, secrets: impl Iterator<Item = &'a Secret>) -> bool {
    let mut changed = false;
    for secret in secrets {
        if text.contains(secret.as_str()) {
            *text = text.replace(secret.as_str(), PLACEHOLDER);
            changed = true;
        }
    }
    changed
}

/// Scrubs every string leaf of a JSON value; keys are left untouched.
pub(crate) fn scrub_value(value: &mut Value, secrets: &SecretSet) {
    let mut pending = vec![value];
    while let Some(current) = pending.pop() {
        match current {
            Value::String(text) => scrub_str(text, secrets),
            Value::Array(items) => pending.extend(items.iter_mut()),
            Value::Object(map) => pending.extend(map.values_mut()),
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn secrets(values: &[&str]) -> SecretSet {
        values.iter().copied().collect()
    }

    #[test]
    fn should_replace_every_occurrence() {
        let mut text = "token=abc&again=abc".to_string();

        scrub_str(&mut text, &secrets(&["abc"]));

        assert_eq!(text, "token=**hidden**&again=**hidden**");
    }

    #[test]
    fn should_mask_longest_secret_first() {
        let mut text = "key abcdef".to_string();

        scrub_str(&mut text, &secrets(&["abc", "abcdef"]));

        assert_eq!(text, "key **hidden**");
    }

    #[test]
    fn should_scrub_nested_values() {
        let mut value = json!({
            "url": "https://example.com?key=s3cr3t",
            "items": [ "s3cr3t", { "inner": "Bearer s3cr3t" }, 42, null, true ],
            "s3cr3t": "key names are kept",
        });

        scrub_value(&mut value, &secrets(&["s3cr3t"]));

        insta::assert_json_snapshot!(value, @r#"
        {
          "url": "https://example.com?key=**hidden**",
          "items": [
            "**hidden**",
            {
              "inner": "Bearer **hidden**"
            },
            42,
            null,
            true
          ],
          "s3cr3t": "key names are kept"
        }
        "#);
    }

    #[test]
    fn should_mask_secret_revealed_by_a_replacement() {
        let mut text = "https://e/xab".to_string();

        scrub_str(&mut text, &secrets(&["ab", "x**h"]));

        assert!(!text.contains("x**h"), "leaked in {text:?}");
        assert_eq!(text, "https://e/**hidden**idden**");
    }

    #[test]
    fn should_apply_secret_inside_placeholder_once() {
        let mut text = "hidden value".to_string();

        scrub_str(&mut text, &secrets(&["hidden"]));

        assert_eq!(text, "**hidden** value");
    }

    #[test]
    fn should_scrub_deeply_nested_values() {
        let mut value = json!("s3cr3t");
        for _ in 0..10_000 {
            value = json!([value]);
        }

        scrub_value(&mut value, &secrets(&["s3cr3t"]));

        let mut current = &value;
        while let Value::Array(items) = current {
            current = &items[0];
        }
        assert_eq!(current, &json!("**hidden**"));
        drop_iteratively(value);
    }

    /// Unnests a value before dropping it, the default drop being recursive.
    fn drop_iteratively(value: Value) {
        let mut pending = vec![value];
        while let Some(current) = pending.pop() {
            match current {
                Value::Array(items) => pending.extend(items),
                Value::Object(map) => pending.extend(map.into_iter().map(|(_, item)| item)),
                _ => {}
            }
        }
    }

    #[test]
    fn should_leave_text_without_secret() {
        let mut text = "nothing to see".to_string();

        scrub_str(&mut text, &secrets(&["abc"]));

        assert_eq!(text, "nothing to see");
    }
}
