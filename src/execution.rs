use std::collections::HashSet;

use crate::{
    error::{RaskError, Result},
    task::{Registry, Task, execution_order},
    util::run_shell_command,
};

pub struct TaskRunner<'a> {
    registry: &'a Registry,
    verbose: bool,
    executed: HashSet<String>,
}

impl<'a> TaskRunner<'a> {
    pub fn new(registry: &'a Registry, verbose: bool) -> Self {
        Self {
            registry,
            verbose,
            executed: HashSet::new(),
        }
    }

    /// Runs `target` after its prerequisites, depth-first and
    /// left-to-right. Tasks already executed in this invocation are
    /// skipped, so a prerequisite shared between targets runs once.
    pub async fn run(&mut self, target: &str) -> Result<()> {
        for name in execution_order(self.registry, target)? {
            if !self.executed.insert(name.clone()) {
                continue;
            }

            let task = self
                .registry
                .get(&name)
                .ok_or_else(|| RaskError::unknown_task(&name))?;

            self.execute_task(task).await?;
        }

        Ok(())
    }

    /// Runs the registry's default targets in declared order, stopping
    /// at the first failure.
    pub async fn run_default(&mut self) -> Result<()> {
        let targets = self.registry.default_targets().to_vec();

        if targets.is_empty() {
            return Err(RaskError::unknown_task("default"));
        }

        for target in targets {
            self.run(&target).await?;
        }

        Ok(())
    }

    async fn execute_task(&self, task: &Task) -> Result<()> {
        if self.verbose {
            println!("Running task: {}", task.id);
        }

        for command in task.commands.to_vec() {
            if self.verbose {
                println!("  {}", command);
            }

            let status = run_shell_command(command).await?;
            if !status.success() {
                return Err(RaskError::CommandFailed {
                    command: command.to_string(),
                    status: status.code(),
                });
            }
        }

        Ok(())
    }
}
