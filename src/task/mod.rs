pub mod config;
pub mod dependency;
pub mod registry;

pub use config::load_taskfile;
pub use dependency::{execution_order, validate};
pub use registry::Registry;

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Task {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub commands: Commands,
}

/// A command body: either a single shell command or an ordered list.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(untagged)]
pub enum Commands {
    #[default]
    None,
    Single(String),
    Many(Vec<String>),
}

impl Commands {
    pub fn to_vec(&self) -> Vec<&str> {
        match self {
            Commands::None => Vec::new(),
            Commands::Single(command) => vec![command.as_str()],
            Commands::Many(commands) => commands.iter().map(String::as_str).collect(),
        }
    }

    pub fn map<F>(self, f: F) -> Self
    where
        F: Fn(&str) -> String,
    {
        match self {
            Commands::None => Commands::None,
            Commands::Single(command) => Commands::Single(f(&command)),
            Commands::Many(commands) => {
                Commands::Many(commands.iter().map(|c| f(c)).collect())
            }
        }
    }
}
