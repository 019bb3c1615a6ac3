use std::path::PathBuf;

use clap::{Parser, Subcommand};
use site_nav::errors::Result;
use site_nav::inject::DEFAULT_PLACEHOLDER_ID;
use site_nav::site::{build_site, inject_file, BuildOptions, DEFAULT_MOUNT};
use site_nav::{load_menu, NavRenderer};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Inject the site navigation menu into static HTML pages.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the navigation fragment for a URL path
    Render {
        #[arg(long)]
        path: String,
        /// Menu JSON file (defaults to the built-in menu)
        #[arg(long)]
        menu: Option<PathBuf>,
    },
    /// Print the resolved prefix and active entry as JSON
    State {
        #[arg(long)]
        path: String,
        #[arg(long)]
        menu: Option<PathBuf>,
    },
    /// Inject the navigation into a single HTML file
    Inject {
        file: PathBuf,
        /// URL path the page is served at
        #[arg(long)]
        path: String,
        #[arg(long)]
        menu: Option<PathBuf>,
        #[arg(long, default_value = DEFAULT_PLACEHOLDER_ID)]
        placeholder: String,
        /// Write back to the file instead of printing
        #[arg(long)]
        in_place: bool,
    },
    /// Inject the navigation into every page below a site root
    Build {
        root: PathBuf,
        /// URL prefix the site root is served under
        #[arg(long, default_value = DEFAULT_MOUNT)]
        mount: String,
        #[arg(long)]
        menu: Option<PathBuf>,
        #[arg(long, default_value = DEFAULT_PLACEHOLDER_ID)]
        placeholder: String,
        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() {
    // Parse CLI arguments.
    let args = Args::parse();

    // Logs go to stderr so stdout carries only the command output.
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args.command) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Render { path, menu } => {
            let renderer = NavRenderer::new(load_menu(menu.as_deref())?);
            print!("{}", renderer.render(&path));
        }
        Command::State { path, menu } => {
            let renderer = NavRenderer::new(load_menu(menu.as_deref())?);
            println!("{}", to_json(&renderer.state(&path))?);
        }
        Command::Inject {
            file,
            path,
            menu,
            placeholder,
            in_place,
        } => {
            let renderer =
                NavRenderer::new(load_menu(menu.as_deref())?).with_placeholder(placeholder);
            let outcome = inject_file(&renderer, &file, &path, in_place)?;
            // In place the file is the output; otherwise echo the page, mounted or not.
            if !in_place {
                print!("{}", outcome.document);
            }
        }
        Command::Build {
            root,
            mount,
            menu,
            placeholder,
            dry_run,
        } => {
            // Build options.
            let menu = load_menu(menu.as_deref())?;
            let options = BuildOptions {
                mount,
                placeholder_id: placeholder,
                dry_run,
            };
            let report = build_site(&root, &menu, &options)?;
            println!("{}", to_json(&report)?);
        }
    }
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
