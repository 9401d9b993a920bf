//! `pomx`: expand shorthand `pomx.xml` descriptors into Maven `pom.xml`.
//!
//! Usage:
//!   pomx expand pomx.xml -o pom.xml
//!   pomx --repository ~/.m2/repository locate path/to/project

mod logging;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pomx_expander::{locate_project, ProjectObjectModel};
use pomx_repository::LocalRepository;

#[derive(Parser, Debug)]
#[command(name = "pomx", version, about = "Expand pomx.xml shorthand into a Maven pom.xml")]
struct Cli {
    /// Local repository holding profile documents [default: ~/.m2/repository]
    #[arg(long, global = true, env = "POMX_REPOSITORY", value_name = "DIR")]
    repository: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Expand a pomx file and print the result or write it to a file
    Expand {
        file: PathBuf,

        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },
    /// Regenerate pom.xml from pomx.xml in a project directory and print its path
    Locate {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let repository = repository(cli.repository)?;
    tracing::debug!(root = %repository.root().display(), "using local repository");

    match cli.command {
        Command::Expand { file, output } => expand(&file, output.as_deref(), &repository),
        Command::Locate { dir } => {
            let pom = locate_project(&dir, &repository)
                .with_context(|| format!("Failed to locate project in {}", dir.display()))?;
            println!("{}", pom.display());
            Ok(())
        }
    }
}

fn repository(configured: Option<PathBuf>) -> Result<LocalRepository> {
    match configured {
        Some(root) => Ok(LocalRepository::new(root)),
        None => LocalRepository::user_default()
            .context("No local repository; pass --repository or set POMX_REPOSITORY"),
    }
}

fn expand(file: &Path, output: Option<&Path>, repository: &LocalRepository) -> Result<()> {
    let mut pom = ProjectObjectModel::read_from(file, repository)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    match output {
        Some(out) => pom
            .write_to(out)
            .with_context(|| format!("Failed to expand {} into {}", file.display(), out.display())),
        None => {
            let xml = pom
                .to_xml_string()
                .with_context(|| format!("Failed to expand {}", file.display()))?;
            std::io::stdout()
                .lock()
                .write_all(xml.as_bytes())
                .context("Failed to write to stdout")
        }
    }
}
