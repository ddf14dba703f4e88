use blog_taxonomy::{config, output, scan};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "blog-taxonomy")]
#[command(about = "Category tree and home feed builder for markdown blogs")]
#[command(long_about = "\
Category tree and home feed builder for markdown blogs

Posts declare categories in their frontmatter. Cataloged posts build the
category tree; series pull their posts out of the home feed.

Content structure:

  content/
  ├── config.toml                  # Category slugs + series (optional)
  ├── posts/
  │   ├── hooks.md                 # slug = file stem
  │   └── weekly-12/index.md       # slug = directory name
  └── .drafts/                     # Hidden entries are skipped

Frontmatter:

  ---
  title: Hooks in depth
  date: 2024-06-01
  categories: [[Notes, Frontend, React]]   # or: Notes / [Notes, Frontend]
  catalog: true                            # include in the category tree
  sticky: false
  ---

Run 'blog-taxonomy gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Directory for the scan manifest
    #[arg(long, default_value = ".blog-taxonomy", global = true)]
    temp_dir: PathBuf,

    /// Include posts marked `draft: true`
    #[arg(long, global = true)]
    drafts: bool,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content and write the manifest
    Scan,
    /// Validate config and frontmatter without writing anything
    Check,
    /// Show the category a URL resolves to
    Resolve {
        /// Category page URL, e.g. /categories/notes/frontend
        url: String,
    },
    /// Show the home page lists
    Home,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let options = scan::ScanOptions {
        include_drafts: cli.drafts,
    };

    match cli.command {
        Command::Scan => {
            let site = scan::scan_with(&cli.source, &options)?;
            std::fs::create_dir_all(&cli.temp_dir)?;
            let manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&site.manifest())?;
            std::fs::write(&manifest_path, json)?;
            output::print_scan_output(&site);
            println!("Manifest \u{2192} {}", manifest_path.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site = scan::scan_with(&cli.source, &options)?;
            output::print_scan_output(&site);
            let unmapped = site.unmapped_categories();
            if unmapped.is_empty() {
                println!("==> Content is valid");
            } else {
                println!(
                    "==> Content is valid; {} categories need a [category_map] entry",
                    unmapped.len()
                );
            }
        }
        Command::Resolve { url } => {
            let site = scan::scan_with(&cli.source, &options)?;
            output::print_resolve_output(&site, &url);
        }
        Command::Home => {
            let site = scan::scan_with(&cli.source, &options)?;
            output::print_home_output(&site.home_feed());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Logs go to stderr so command output stays pipeable.
fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
