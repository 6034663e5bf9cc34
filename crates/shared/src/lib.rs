pub mod macros;
pub mod registry;
pub mod schemas;
pub mod toolbelts;

pub use registry::{RegistryError, ToolBox};
pub use schemas::{Tool, ToolHandler};
