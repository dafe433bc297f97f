use clap::Parser;
use std::process;

use rask::cli::Cli;
use rask::error::Result;
use rask::execution::TaskRunner;
use rask::task::{Registry, execution_order, load_taskfile};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Cli::parse();

    if let Err(e) = run_rask(args).await {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

async fn run_rask(args: Cli) -> Result<()> {
    let registry = load_taskfile(&args.file)?;

    if args.list {
        list_tasks(&registry, &args.file);
        return Ok(());
    }

    if args.dry_run {
        return dry_run(&registry, args.task.as_deref());
    }

    let mut runner = TaskRunner::new(&registry, args.verbose);
    match &args.task {
        Some(task) => runner.run(task).await,
        None => runner.run_default().await,
    }
}

fn list_tasks(registry: &Registry, file: &str) {
    println!("Tasks in {}:", file);

    let mut tasks: Vec<_> = registry.tasks().iter().collect();
    tasks.sort_by(|a, b| a.id.cmp(&b.id));

    let width = tasks.iter().map(|t| t.id.len()).max().unwrap_or(0);
    for task in tasks {
        match &task.description {
            Some(description) => println!("  {:<width$}  {}", task.id, description),
            None => println!("  {}", task.id),
        }
    }
}

fn dry_run(registry: &Registry, target: Option<&str>) -> Result<()> {
    let targets = match target {
        Some(task) => vec![task.to_string()],
        None => registry.default_targets().to_vec(),
    };

    if targets.is_empty() {
        return Err(rask::RaskError::unknown_task("default"));
    }

    println!("Dry run mode - showing what would be executed:");

    let mut shown = std::collections::HashSet::new();
    for target in &targets {
        for name in execution_order(registry, target)? {
            if !shown.insert(name.clone()) {
                continue;
            }
            if let Some(task) = registry.get(&name) {
                for command in task.commands.to_vec() {
                    println!("  {} would run: {}", task.id, command);
                }
            }
        }
    }

    Ok(())
}
