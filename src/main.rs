//! docsmap: section indexes and remote posts for documentation sites.
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use docsmap::config::Config;
use docsmap::error::{Error, ExitCode};
use docsmap::layout::LayoutContext;
use docsmap::logging::{self, LogFormat};
use docsmap::posts::{posts_handler, GetPostsParams};
use docsmap::registry::build_section_index;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docsmap")]
#[command(about = "Section indexes and remote posts for documentation sites", long_about = None)]
struct Args {
    /// Configuration file (defaults to ./docsmap.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Human)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the page path to sections index as JSON
    Index {
        /// Content root to scan
        #[arg(long)]
        root: Option<PathBuf>,

        /// File extensions to match
        #[arg(long, short = 'e', value_name = "EXT")]
        ext: Vec<String>,

        /// Derive sections from headings for pages without a sections export
        #[arg(long)]
        headings: bool,

        /// Print on a single line
        #[arg(long)]
        compact: bool,
    },
    /// Print the layout context, or a single resolved page
    Layout {
        /// Content root to scan
        #[arg(long)]
        root: Option<PathBuf>,

        /// Page path to resolve (e.g. /intro)
        #[arg(long)]
        page: Option<String>,
    },
    /// Fetch posts and print them as JSON
    Posts {
        /// Maximum number of posts
        #[arg(long)]
        limit: Option<u32>,

        /// Page number
        #[arg(long)]
        page: Option<u32>,

        /// Endpoint to query instead of the configured one
        #[arg(long)]
        url: Option<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    logging::init_logging(args.log_format, args.verbose);

    let code = match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            e.exit_code()
        }
    };
    std::process::exit(code);
}

async fn run(args: Args) -> Result<(), Error> {
    let mut cfg = Config::load(args.config.as_deref())?;

    match args.command {
        Command::Index {
            root,
            ext,
            headings,
            compact,
        } => {
            // Override config with command line args
            if let Some(root) = root {
                cfg.content_root = root.to_string_lossy().into_owned();
            }
            if !ext.is_empty() {
                cfg.file_extensions = ext;
            }
            if headings {
                cfg.derive_from_headings = true;
            }

            let index = build_section_index(&cfg).await?;
            print_json(&index, !compact)
        }
        Command::Layout { root, page } => {
            if let Some(root) = root {
                cfg.content_root = root.to_string_lossy().into_owned();
            }

            let ctx = LayoutContext::build(&cfg).await?;
            match page {
                Some(path) => print_json(&ctx.require_page(&path)?, true),
                None => print_json(&ctx, true),
            }
        }
        Command::Posts { limit, page, url } => {
            let client = reqwest::Client::new();
            let handler = posts_handler(client, url.unwrap_or(cfg.posts_url));
            let posts = handler.call(GetPostsParams { limit, page }).await?;
            print_json(&posts, true)
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), Error> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
