pub mod agent;
pub mod config;
pub mod model;

pub use agent::{Agent, AgentError, Decision};
pub use config::{Config, ConfigError};
pub use model::{ModelBackend, ModelError, OllamaModel};
