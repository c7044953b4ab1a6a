//! wsguard - front door for the workspace-bounded commands
//!
//! "Stay inside the project."
//!
//! wcd, wmv and wrm each refuse to act outside the workspace root. This
//! command answers the shared questions directly (where is the root, is
//! this path inside it) and sets up the shell wrapper wcd needs.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

use wsguard_core::check::{all_passed, check_paths};
use wsguard_core::shell::Shell;
use wsguard_core::{find_workspace_root, format, Invocation, WsError};

/// Tool metadata
#[derive(Debug, Clone, Serialize)]
struct Tool {
    name: &'static str,
    description: &'static str,
}

const TOOLS: &[Tool] = &[
    Tool {
        name: "wcd",
        description: "Change directory inside the workspace (needs the shell wrapper)",
    },
    Tool {
        name: "wmv",
        description: "Move or rename inside the workspace",
    },
    Tool {
        name: "wrm",
        description: "Remove inside the workspace",
    },
];

#[derive(Parser)]
#[command(name = "wsguard")]
#[command(about = "Workspace boundary lookup, checks and shell setup")]
#[command(version)]
#[command(after_help = "\
EXAMPLES:
    wsguard root                  Print the workspace root
    wsguard check src ../other    Is each path inside the workspace?
    wsguard init zsh              Print the wcd shell wrapper
    wsguard tools                 Show which commands are installed

SETUP:
    eval \"$(wsguard init bash)\"     in ~/.bashrc
    eval \"$(wsguard init zsh)\"      in ~/.zshrc
    wsguard init fish | source      in ~/.config/fish/config.fish")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the workspace root for the current directory
    Root {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether paths resolve inside the workspace
    Check {
        /// Paths to check
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the shell function that makes wcd change directory
    Init {
        /// Shell type: bash, zsh or fish (default: from $SHELL)
        shell: Option<String>,
    },

    /// List the workspace commands and whether they are on PATH
    Tools {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    wsguard_core::logging::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Root { json } => cmd_root(json),
        Commands::Check { paths, json } => cmd_check(&paths, json),
        Commands::Init { shell } => cmd_init(shell),
        Commands::Tools { json } => cmd_tools(json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<WsError>() {
                Some(ws) => format::error(ws),
                None => eprintln!("{} {:#}", "error:".red(), e),
            }
            ExitCode::FAILURE
        }
    }
}

fn cmd_root(json: bool) -> Result<ExitCode> {
    let cwd = std::env::current_dir().map_err(WsError::CurrentDir)?;
    let cwd = cwd.canonicalize().context("Could not resolve current directory")?;

    let Some(root) = find_workspace_root(&cwd)? else {
        if json {
            println!("{}", serde_json::json!({ "root": null, "marker": null }));
        }
        return Err(WsError::NoWorkspace(cwd).into());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&root)?);
    } else {
        println!("{}", format::root_line(&root));
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_check(paths: &[PathBuf], json: bool) -> Result<ExitCode> {
    let inv = Invocation::from_current_dir()?;
    let verdicts = check_paths(&inv, paths, Invocation::resolve);

    if json {
        let out = serde_json::json!({
            "root": inv.root.path,
            "marker": inv.root.marker,
            "verdicts": verdicts,
            "all_inside": all_passed(&verdicts),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{} {}", "Workspace:".bold(), format::root_line(&inv.root));
        format::print_verdicts(&verdicts);
    }

    Ok(if all_passed(&verdicts) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_init(shell: Option<String>) -> Result<ExitCode> {
    let shell = match shell {
        Some(name) => match Shell::from_name(&name) {
            Some(shell) => shell,
            None => {
                eprintln!("{} Unknown shell: {}", "error:".red(), name);
                eprintln!("Supported shells: bash, zsh, fish");
                return Ok(ExitCode::FAILURE);
            }
        },
        None => Shell::from_env_value(std::env::var("SHELL").ok().as_deref()),
    };

    // stdout is meant to be eval'd, so only the script goes there
    print!("{}", shell.wrapper());
    eprintln!("{} {}", "hint:".dimmed(), shell.rc_hint().dimmed());
    Ok(ExitCode::SUCCESS)
}

fn cmd_tools(json: bool) -> Result<ExitCode> {
    #[derive(Serialize)]
    struct ToolInfo {
        name: &'static str,
        description: &'static str,
        installed: bool,
        path: Option<PathBuf>,
    }

    let tools_info: Vec<ToolInfo> = TOOLS
        .iter()
        .map(|t| {
            let path = which::which(t.name).ok();
            ToolInfo {
                name: t.name,
                description: t.description,
                installed: path.is_some(),
                path,
            }
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&tools_info)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "wsguard tools".bold());
    println!();
    for info in &tools_info {
        if info.installed {
            println!("{} {:<5} {}", "ok".green(), info.name.cyan(), info.description);
        } else {
            println!(
                "{} {:<5} {}",
                "--".yellow(),
                info.name.cyan(),
                format!("{} (not on PATH)", info.description).dimmed()
            );
        }
    }

    if !tools_info.iter().all(|t| t.installed) {
        let bin_dir = dirs::home_dir()
            .map(|h| h.join(".cargo/bin"))
            .unwrap_or_else(|| PathBuf::from("~/.cargo/bin"));
        println!();
        println!("Install with `cargo install --path crates/<tool>`; binaries land in {}", bin_dir.display());
    }

    Ok(ExitCode::SUCCESS)
}
