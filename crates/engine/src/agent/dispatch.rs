use courier_shared::ToolBox;
use tracing::{info, warn};

use super::AgentError;
use super::decision::{Decision, payload_text};

/// Resolves a decision to its observable result.
///
/// Tool failures come back as ordinary strings from the tool itself; only a
/// decision that could not be parsed is an error here.
pub fn dispatch(decision: Decision, toolbox: &ToolBox) -> Result<String, AgentError> {
    match decision {
        Decision::ParseError { raw, reason } => {
            Err(AgentError::MalformedDecision { raw, reason })
        }
        Decision::DirectAnswer { text } => Ok(text),
        Decision::ToolCall { name, payload } => match toolbox.get(&name) {
            Some(tool) => {
                info!(tool = tool.name, "Dispatching tool call");
                Ok(tool.call(&payload))
            }
            None => {
                warn!(tool = %name, "Model chose an unregistered tool, answering with its input");
                Ok(payload_text(payload))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_shared::toolbelts::{calculator, text};
    use serde_json::json;

    fn toolbox() -> ToolBox {
        ToolBox::from_tools(&[calculator::TOOL_ENTRIES[0], text::TOOL_ENTRIES[0]]).unwrap()
    }

    #[test]
    fn routes_to_the_named_tool() {
        let decision = Decision::parse(r#"{"tool_choice":"reverse_string","tool_input":"abc"}"#);
        assert_eq!(
            dispatch(decision, &toolbox()).unwrap(),
            text::reverse(&json!("abc"))
        );
    }

    #[test]
    fn calculator_receives_mapping_input() {
        let decision = Decision::ToolCall {
            name: "basic_calculator".to_string(),
            payload: json!({ "num1": 100, "num2": 5, "operation": "divide" }),
        };
        assert_eq!(dispatch(decision, &toolbox()).unwrap(), "The answer is: 20");
    }

    #[test]
    fn tool_errors_are_ordinary_results() {
        let decision = Decision::ToolCall {
            name: "reverse_string".to_string(),
            payload: json!(42),
        };
        assert_eq!(
            dispatch(decision, &toolbox()).unwrap(),
            "Error: Input must be a string"
        );
    }

    #[test]
    fn no_tool_answers_with_the_input() {
        let decision = Decision::parse(r#"{"tool_choice":"no tool","tool_input":"Hello!"}"#);
        assert_eq!(dispatch(decision, &toolbox()).unwrap(), "Hello!");
    }

    #[test]
    fn unknown_tool_answers_with_the_input() {
        let decision = Decision::ToolCall {
            name: "send_email".to_string(),
            payload: json!("Sure, sending it now."),
        };
        assert_eq!(dispatch(decision, &toolbox()).unwrap(), "Sure, sending it now.");
    }

    #[test]
    fn parse_errors_propagate() {
        let err = dispatch(Decision::parse("not json"), &toolbox()).unwrap_err();
        assert!(matches!(err, AgentError::MalformedDecision { ref raw, .. } if raw == "not json"));
    }
}
