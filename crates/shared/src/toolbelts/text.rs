// crates/shared/src/toolbelts/text.rs

use serde_json::Value;

use crate::register_toolbelt;

#[derive(Default)]
pub struct Text;

register_toolbelt! {
    Text {
        tools: {
            "reverse_string" => reverse_string {
                doc: "Reverse the given string. \
                      Input: the text to be reversed, as a plain string. \
                      Returns: the reversed string.",
            }
        }
    }
}

impl Text {
    fn reverse_string(&self, input: &Value) -> String {
        reverse(input)
    }
}

pub fn reverse(input: &Value) -> String {
    match input.as_str() {
        Some(text) => format!("The reversed string is: {}", reverse_text(text)),
        None => "Error: Input must be a string".to_string(),
    }
}

/// Reverses by Unicode scalar value. Combining marks end up detached from
/// the character they followed.
pub fn reverse_text(text: &str) -> String {
    text.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn reverses_text() {
        assert_eq!(reverse(&json!("Python")), "The reversed string is: nohtyP");
        assert_eq!(reverse(&json!("Howwwww")), "The reversed string is: wwwwwoH");
    }

    #[test]
    fn reverses_by_code_point() {
        assert_eq!(reverse_text("héllo"), "olléh");
        assert_eq!(reverse_text("日本語"), "語本日");
    }

    #[test]
    fn empty_text_reverses_to_empty() {
        assert_eq!(reverse(&json!("")), "The reversed string is: ");
    }

    #[test]
    fn non_text_input_is_rejected() {
        for input in [json!(12), json!({ "text": "abc" }), json!(["a"]), json!(null)] {
            assert_eq!(reverse(&input), "Error: Input must be a string");
        }
    }

    proptest! {
        #[test]
        fn reversing_twice_is_identity(text in ".*") {
            prop_assert_eq!(reverse_text(&reverse_text(&text)), text);
        }
    }
}
