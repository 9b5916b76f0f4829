use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::builder::BuildOptions;

/// Command line interface for northdoc
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "northdoc: sectioned, navigable HTML pages from markdown"
)]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`]). Defaults to `build`.
  #[command(subcommand)]
  pub command: Option<Commands>,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to the configuration file (TOML, JSON or YAML). Searched for in the
  /// current directory when omitted.
  #[arg(short = 'c', long = "config-file", global = true)]
  pub config_file: Option<PathBuf>,
}

/// All supported subcommands for the northdoc CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Build every configured document into an HTML page.
  Build {
    /// Output directory for generated pages.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Path to a custom page template.
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Continue with the remaining documents when one fails.
    #[arg(short, long)]
    keep_going: bool,

    /// Only build the document with this output file name.
    #[arg(long, value_name = "FILE")]
    only: Option<String>,
  },

  /// Initialize a new northdoc configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "northdoc.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json", "yaml"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Export the default page template for customization.
  ///
  /// Templates are Tera templates: a literal `{{`, `{%` or `{#` (in an inline
  /// script, say) must be wrapped in `{% raw %}...{% endraw %}`.
  ExportTemplates {
    /// Output directory for template files.
    #[arg(short, long, default_value = "templates")]
    output_dir: PathBuf,

    /// Whether to overwrite existing files.
    #[arg(long)]
    force: bool,
  },
}

impl Commands {
  /// Options for [`crate::builder::build_all`] carried by a `build` command.
  #[must_use]
  pub fn build_options(&self) -> BuildOptions {
    match self {
      Self::Build {
        keep_going, only, ..
      } => {
        BuildOptions {
          keep_going: *keep_going,
          only:       only.clone(),
        }
      },
      _ => BuildOptions::default(),
    }
  }
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
