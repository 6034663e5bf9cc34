// crates/shared/src/schemas
use serde_json::Value;

pub type ToolHandler = fn(&Value) -> String;

/// A named callable the agent can hand a decision's input to.
///
/// `doc` is what the model sees in the tool catalogue, so it should say what
/// the tool does, what input shape it expects and what it returns.
#[derive(Debug, Clone, Copy)]
pub struct Tool {
    pub name: &'static str,
    pub doc: &'static str,
    pub handler: ToolHandler,
}

impl Tool {
    pub const fn new(name: &'static str, doc: &'static str, handler: ToolHandler) -> Self {
        Self { name, doc, handler }
    }

    pub fn call(&self, input: &Value) -> String {
        (self.handler)(input)
    }

    /// Catalogue line for this tool.
    pub fn describe(&self) -> String {
        format!("{}: {}", self.name, self.doc)
    }
}
