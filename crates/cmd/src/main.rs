// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand};

use cmd::common::load_options;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "hostfile")]
struct Cli {
    /// YAML file with handle options (link extension, digest, creation mode)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show metadata for files
    Stat {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Copy a file to stdout, following portable links
    Cat {
        path: PathBuf,
        /// Bytes per read
        #[arg(long, default_value_t = 65536)]
        chunk_size: usize,
    },
    /// Print a text file with line numbers
    Lines { path: PathBuf },
    /// Print content digests
    Digest {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Write bytes into a file at an offset
    #[command(group(ArgGroup::new("source").required(true).args(["text", "from"])))]
    Write {
        path: PathBuf,
        #[arg(long, default_value_t = 0)]
        offset: u64,
        /// Literal text to write
        #[arg(long)]
        text: Option<String>,
        /// Host file whose content is written
        #[arg(long)]
        from: Option<PathBuf>,
    },
    /// Create a portable link
    Link { link: PathBuf, target: PathBuf },
    /// Remove files; missing files are ignored
    Rm {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Wait until a file stops changing
    Watch {
        path: PathBuf,
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
        #[arg(long, default_value_t = 10)]
        max_polls: u32,
    },
}

#[allow(clippy::print_stdout)]
fn print_line(line: String) {
    println!("{}", line);
}

fn main() -> Result<()> {
    diagnostics::init();

    let cli = Cli::parse();
    let options = load_options(cli.config.as_deref())?;

    match cli.command {
        Commands::Stat { paths } => cmd::stat_command(&options, &paths, print_line),
        Commands::Cat { path, chunk_size } => {
            let mut stdout = std::io::stdout().lock();
            cmd::cat_command(&options, &path, chunk_size, &mut stdout).map(|_| ())
        }
        Commands::Lines { path } => cmd::lines_command(&options, &path, print_line).map(|_| ()),
        Commands::Digest { paths } => cmd::digest_command(&options, &paths, print_line),
        Commands::Write {
            path,
            offset,
            text,
            from,
        } => {
            let data = match (text, from) {
                (Some(text), _) => text.into_bytes(),
                (None, Some(from)) => std::fs::read(&from)
                    .with_context(|| format!("Failed to read {}", from.display()))?,
                (None, None) => Vec::new(),
            };
            cmd::write_command(&options, &path, offset, &data)
        }
        Commands::Link { link, target } => cmd::link_command(&options, &link, &target),
        Commands::Rm { paths } => cmd::rm_command(&options, &paths),
        Commands::Watch {
            path,
            interval_ms,
            max_polls,
        } => {
            let stable = cmd::watch_command(
                &options,
                &path,
                Duration::from_millis(interval_ms),
                max_polls,
                print_line,
            )?;
            if !stable {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
