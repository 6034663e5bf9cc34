use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::schemas::Tool;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("tool '{name}' is already registered")]
    Duplicate { name: String },
}

/// Ordered set of tools, keyed by name.
///
/// Order is registration order and is what the model sees in the catalogue.
#[derive(Debug, Clone, Default)]
pub struct ToolBox {
    tools: Vec<Tool>,
}

impl ToolBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a toolbox, rejecting the first name that appears twice.
    pub fn from_tools(tools: &[Tool]) -> Result<Self, RegistryError> {
        let mut toolbox = Self::new();
        for tool in tools {
            toolbox.register(*tool)?;
        }
        Ok(toolbox)
    }

    pub fn register(&mut self, tool: Tool) -> Result<(), RegistryError> {
        if self.position(tool.name).is_some() {
            return Err(RegistryError::Duplicate {
                name: tool.name.to_string(),
            });
        }
        self.tools.push(tool);
        Ok(())
    }

    /// Records every tool, replacing an existing entry of the same name in place.
    pub fn store(&mut self, tools: &[Tool]) {
        for tool in tools {
            match self.position(tool.name) {
                Some(index) => {
                    warn!(tool = tool.name, "Tool name registered twice, keeping the later one");
                    self.tools[index] = *tool;
                }
                None => self.tools.push(*tool),
            }
        }
    }

    /// One `name: doc` line per tool.
    pub fn describe(&self) -> String {
        self.tools
            .iter()
            .map(Tool::describe)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }

    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    pub fn invoke(&self, name: &str, input: &Value) -> Option<String> {
        self.get(name).map(|tool| tool.call(input))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tools.iter().map(|tool| tool.name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.tools.iter().position(|tool| tool.name == name)
    }
}
