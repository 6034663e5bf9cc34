pub mod decision;
pub mod dispatch;
pub mod prompt;

use courier_shared::ToolBox;
use thiserror::Error;
use tracing::debug;

use crate::model::{ModelBackend, ModelError};
pub use decision::{Decision, NO_TOOL};
pub use dispatch::dispatch;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("model returned a malformed decision ({reason}): {raw}")]
    MalformedDecision { raw: String, reason: String },
}

/// Single-shot tool-calling agent: one prompt, one decision, one dispatch.
pub struct Agent<B> {
    toolbox: ToolBox,
    backend: B,
    system_prompt: String,
}

impl<B: ModelBackend> Agent<B> {
    pub fn new(toolbox: ToolBox, backend: B) -> Self {
        let system_prompt = prompt::build_system_prompt(&toolbox.describe());
        Self {
            toolbox,
            backend,
            system_prompt,
        }
    }

    /// The tool catalogue as it appears in the system prompt.
    pub fn prepare_tools(&self) -> String {
        self.toolbox.describe()
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn think(&self, prompt: &str) -> Result<Decision, AgentError> {
        let raw = self.backend.generate(&self.system_prompt, prompt).await?;
        let decision = Decision::parse(&raw);
        debug!(?decision, "Decoded model decision");
        Ok(decision)
    }

    /// Runs the full think, parse and dispatch cycle for one prompt.
    pub async fn work(&self, prompt: &str) -> Result<String, AgentError> {
        let decision = self.think(prompt).await?;
        dispatch(decision, &self.toolbox)
    }
}
