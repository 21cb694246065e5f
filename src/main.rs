use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fs_service::fs::{read_json_file, FileSystem, LiveFileSystem, LiveFileSystemOptions, Result};
use fs_service::logging::init_logging;

#[derive(Parser)]
#[command(name = "fs-service")]
#[command(about = "Read, write, remove and glob files from the command line")]
#[command(version)]
struct Cli {
    /// Base directory for relative paths and patterns
    #[arg(long = "cwd", global = true)]
    cwd: Option<PathBuf>,

    /// Let glob wildcards match dotfiles
    #[arg(long = "dot", global = true)]
    dot: bool,

    /// Match glob patterns case-insensitively
    #[arg(long = "ignore-case", global = true)]
    ignore_case: bool,

    /// Output results as JSON
    #[arg(long = "json", global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the contents of a file
    Read { path: String },
    /// Write content to a file, creating parent directories
    Write { path: String, content: String },
    /// Remove a file or directory (no-op when absent)
    Rm { path: String },
    /// Report whether a path exists
    Exists { path: String },
    /// List paths matching a glob pattern
    Glob {
        pattern: String,
        /// Ignore pattern; may be repeated
        #[arg(short = 'x', long = "exclude")]
        exclude: Vec<String>,
    },
    /// Parse a JSON file and print it
    Json { path: String },
}

#[tokio::main]
async fn main() {
    init_logging();
    let cli = Cli::parse();

    let fs = LiveFileSystem::with_options(LiveFileSystemOptions {
        cwd: cli.cwd,
        dot: cli.dot,
        case_sensitive: !cli.ignore_case,
    });

    match run(&fs, cli.command, cli.json).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

async fn run(fs: &dyn FileSystem, command: Command, json: bool) -> Result<String> {
    let output = match command {
        Command::Read { path } => {
            let content = fs.read_file(&path).await?;
            if json {
                serde_json::json!({ "path": path, "content": content }).to_string()
            } else {
                content
            }
        }
        Command::Write { path, content } => {
            fs.write_file(&path, &content).await?;
            if json {
                serde_json::json!({ "path": path, "written": true }).to_string()
            } else {
                String::new()
            }
        }
        Command::Rm { path } => {
            fs.remove_file(&path).await?;
            if json {
                serde_json::json!({ "path": path, "removed": true }).to_string()
            } else {
                String::new()
            }
        }
        Command::Exists { path } => {
            let exists = fs.exists(&path).await?;
            if json {
                serde_json::json!({ "path": path, "exists": exists }).to_string()
            } else {
                exists.to_string()
            }
        }
        Command::Glob { pattern, exclude } => {
            let matches = fs.glob(&pattern, &exclude).await?;
            if json {
                serde_json::json!(matches).to_string()
            } else {
                matches.join("\n")
            }
        }
        Command::Json { path } => {
            let value = read_json_file(fs, &path).await?;
            if json {
                value.to_string()
            } else {
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
            }
        }
    };
    Ok(output)
}
