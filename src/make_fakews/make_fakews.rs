// make_fakews.rs: CLI that writes build-tool workspaces described by TOML layout files
// Usage: cargo run --bin make_fakews -- <generate|modify|manifest> ...

mod paths;
mod run;

use std::path::PathBuf;
use std::process::exit;

use clap::{ArgAction, Parser, Subcommand};

use fakews::logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "make_fakews", version, about = "Generate build-tool workspaces for tests")]
struct Cli {
    /// Increase log output (-v info, -vv debug). RUST_LOG overrides this.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new workspace from a layout file
    Generate {
        /// TOML layout describing files and packages
        #[arg(long)]
        layout: PathBuf,
        /// Target directory (must be empty or missing); defaults to a fresh temp dir
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print every generated file before the summary line
        #[arg(long)]
        manifest: bool,
    },
    /// Apply a layout file to an existing workspace, replacing files in place
    Modify {
        #[arg(long)]
        layout: PathBuf,
        #[arg(long)]
        root: PathBuf,
    },
    /// Print every file of a workspace, one relative path per line
    Manifest { root: PathBuf },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Generate {
            layout,
            out,
            manifest,
        } => {
            let out = out.map(|p| paths::absolutize(&p));
            run::generate(&paths::absolutize(&layout), out.as_deref(), manifest)
        }
        Command::Modify { layout, root } => {
            run::modify(&paths::absolutize(&layout), &paths::absolutize(&root))
        }
        Command::Manifest { root } => run::manifest(&paths::absolutize(&root)),
    };

    if let Err(e) = result {
        eprintln!("make_fakews: {:#}", e);
        exit(1);
    }
}
