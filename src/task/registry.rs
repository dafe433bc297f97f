use super::Task;
use crate::error::{RaskError, Result};

/// Named tasks plus the targets to run when none is given on the
/// command line. Tasks are immutable once registered.
#[derive(Debug, Default)]
pub struct Registry {
    tasks: Vec<Task>,
    default_targets: Vec<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, task: Task) -> Result<()> {
        if self.contains(&task.id) {
            return Err(RaskError::DuplicateTask(task.id));
        }
        self.tasks.push(task);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn default_targets(&self) -> &[String] {
        &self.default_targets
    }

    pub fn set_default_targets(&mut self, targets: Vec<String>) {
        self.default_targets = targets;
    }
}
