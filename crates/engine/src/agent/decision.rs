use serde_json::Value;

/// `tool_choice` value meaning "answer the user directly".
pub const NO_TOOL: &str = "no tool";

/// What the model asked for, decoded from its raw reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    ToolCall { name: String, payload: Value },
    DirectAnswer { text: String },
    ParseError { raw: String, reason: String },
}

impl Decision {
    /// Decodes `{"tool_choice": string, "tool_input": any}`.
    ///
    /// Never fails: anything that isn't that shape becomes
    /// [`Decision::ParseError`] carrying the raw text.
    pub fn parse(raw: &str) -> Self {
        let parse_error = |reason: String| Decision::ParseError {
            raw: raw.to_string(),
            reason,
        };

        let value: Value = match serde_json::from_str(raw.trim()) {
            Ok(value) => value,
            Err(e) => return parse_error(format!("invalid JSON: {e}")),
        };
        let Value::Object(mut fields) = value else {
            return parse_error("expected a JSON object".to_string());
        };

        let name = match fields.remove("tool_choice") {
            Some(Value::String(name)) => name,
            Some(_) => return parse_error("'tool_choice' must be a string".to_string()),
            None => return parse_error("missing 'tool_choice' field".to_string()),
        };
        let Some(payload) = fields.remove("tool_input") else {
            return parse_error("missing 'tool_input' field".to_string());
        };

        if name == NO_TOOL {
            Decision::DirectAnswer {
                text: payload_text(payload),
            }
        } else {
            Decision::ToolCall { name, payload }
        }
    }
}

/// Text shown when a payload is answered with directly: strings as-is,
/// anything else as compact JSON.
pub fn payload_text(payload: Value) -> String {
    match payload {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tool_call_with_text_input() {
        assert_eq!(
            Decision::parse(r#"{"tool_choice": "reverse_string", "tool_input": "abc"}"#),
            Decision::ToolCall {
                name: "reverse_string".to_string(),
                payload: json!("abc"),
            }
        );
    }

    #[test]
    fn tool_call_with_mapping_input() {
        let decision = Decision::parse(
            r#"{"tool_choice": "basic_calculator",
                "tool_input": {"num1": 15, "num2": 7, "operation": "add"}}"#,
        );
        assert_eq!(
            decision,
            Decision::ToolCall {
                name: "basic_calculator".to_string(),
                payload: json!({ "num1": 15, "num2": 7, "operation": "add" }),
            }
        );
    }

    #[test]
    fn no_tool_is_a_direct_answer() {
        assert_eq!(
            Decision::parse(r#"{"tool_choice": "no tool", "tool_input": "Hello!"}"#),
            Decision::DirectAnswer {
                text: "Hello!".to_string()
            }
        );
    }

    #[test]
    fn direct_answer_with_structured_input_is_json_text() {
        assert_eq!(
            Decision::parse(r#"{"tool_choice": "no tool", "tool_input": {"a": 1}}"#),
            Decision::DirectAnswer {
                text: r#"{"a":1}"#.to_string()
            }
        );
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        assert!(matches!(
            Decision::parse("\n  {\"tool_choice\": \"no tool\", \"tool_input\": \"hi\"}  \n"),
            Decision::DirectAnswer { .. }
        ));
    }

    #[test]
    fn malformed_replies_keep_the_raw_text() {
        let cases = [
            ("I think you should add them", "invalid JSON"),
            (r#"["tool_choice"]"#, "expected a JSON object"),
            (r#"{"tool_input": "x"}"#, "missing 'tool_choice' field"),
            (r#"{"tool_choice": 3, "tool_input": "x"}"#, "'tool_choice' must be a string"),
            (r#"{"tool_choice": "reverse_string"}"#, "missing 'tool_input' field"),
        ];

        for (raw, expected) in cases {
            match Decision::parse(raw) {
                Decision::ParseError { raw: kept, reason } => {
                    assert_eq!(kept, raw);
                    assert!(reason.starts_with(expected), "{reason} for {raw}");
                }
                other => panic!("expected a parse error for {raw}, got {other:?}"),
            }
        }
    }

    #[test]
    fn null_input_is_still_present() {
        assert_eq!(
            Decision::parse(r#"{"tool_choice": "get_bangkok_weather", "tool_input": null}"#),
            Decision::ToolCall {
                name: "get_bangkok_weather".to_string(),
                payload: Value::Null,
            }
        );
    }
}
