use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Taskfile to use
    #[arg(short = 'f', long = "file", default_value = "rask.toml")]
    pub file: String,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// List tasks with their descriptions
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Show what would be executed without running tasks
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Task to run, runs the default task(s) if not specified
    pub task: Option<String>,
}
