use clap::{Parser, Subcommand};
use html_include::process::{self, ProcessOptions};
use html_include::{config, output};
use std::path::PathBuf;

/// Shared flags for commands that expand markers.
#[derive(clap::Args, Clone, Default)]
struct ExpandArgs {
    /// Fail on markers that name no known include
    #[arg(long)]
    strict: bool,
}

#[derive(Parser)]
#[command(name = "html-include")]
#[command(version, about = "Splice shared HTML fragments into static site pages")]
#[command(long_about = "\
Splice shared HTML fragments into static site pages

Every `<!-- @include NAME -->` marker in a page is replaced with the contents
of the include file NAME, and the page is rewritten in place. Pages that do
not change are never written.

Site layout (defaults):

  site/
  ├── include.toml          # Optional config (see gen-config)
  ├── _includes/
  │   ├── header.html       # <!-- @include header -->
  │   └── footer.html       # <!-- @include footer -->
  ├── index.html            # *.html
  └── pages/
      └── blog/post.html    # pages/**/*.html

Run without a subcommand to build.")]
struct Cli {
    /// Site root; include dir and patterns are relative to it
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file [default: <root>/include.toml]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Expand markers and rewrite changed pages (default)
    Build(ExpandArgs),
    /// Report which pages would change without writing anything
    Check(ExpandArgs),
    /// Print a stock include.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (args, dry_run) = match cli.command {
        Some(Command::GenConfig) => {
            print!("{}", config::stock_config_toml());
            return Ok(());
        }
        Some(Command::Build(args)) => (args, false),
        Some(Command::Check(args)) => (args, true),
        None => (ExpandArgs::default(), false),
    };

    let site_config = match &cli.config {
        Some(path) if !path.exists() => {
            return Err(format!("config file not found: {}", path.display()).into());
        }
        Some(path) => config::load_config_file(path)?,
        None => config::load_config(&cli.root)?,
    };

    let options = ProcessOptions {
        strict: args.strict,
        dry_run,
    };
    let report = process::build_with_events(&cli.root, &site_config, options, |event| {
        output::print_event(&event, &cli.root, dry_run)
    })?;
    output::print_summary(&report);

    Ok(())
}
