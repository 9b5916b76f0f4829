use std::fs;

use color_eyre::eyre::{Context, Result, bail};
use log::{LevelFilter, info, warn};
use northdoc::{
  builder::{self, BuildOptions},
  cli::{Cli, Commands},
};
use northdoc_config::Config;

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  match &cli.command {
    Some(Commands::Init {
      output,
      format,
      force,
    }) => {
      if output.exists() && !force {
        bail!(
          "Configuration file already exists: {}. Use --force to overwrite.",
          output.display()
        );
      }

      if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
      {
        fs::create_dir_all(parent).wrap_err_with(|| {
          format!("Failed to create directory: {}", parent.display())
        })?;
        info!("Created directory: {}", parent.display());
      }

      Config::generate_default_config(format, output).wrap_err_with(|| {
        format!("Failed to generate configuration file: {}", output.display())
      })?;

      info!(
        "Configuration file created successfully. Add your documents under \
         `docs` and run `northdoc build`."
      );
      Ok(())
    },

    Some(Commands::ExportTemplates { output_dir, force }) => {
      Config::export_templates(output_dir, *force).wrap_err_with(|| {
        format!("Failed to export templates to {}", output_dir.display())
      })
    },

    Some(command @ Commands::Build {
      output_dir,
      template,
      ..
    }) => {
      let mut config = load_config(&cli)?;
      config.merge_with_cli(output_dir.clone(), template.clone());
      build(&config, &command.build_options())
    },

    None => {
      let config = load_config(&cli)?;
      build(&config, &BuildOptions::default())
    },
  }
}

fn load_config(cli: &Cli) -> Result<Config> {
  Config::load(cli.config_file.as_deref()).wrap_err("Failed to load configuration")
}

fn build(config: &Config, options: &BuildOptions) -> Result<()> {
  config.validate()?;

  info!("Building {} documents...", config.docs.len());
  let summary = builder::build_all(config, options)?;

  if summary.corrections > 0 {
    info!("Repaired {} anchor links", summary.corrections);
  }

  if !summary.is_success() {
    for (file, e) in &summary.failed {
      warn!("{file}: {e}");
    }
    let failed = summary.failed.len();
    return Err(northdoc::error::NorthdocError::Incomplete {
      failed,
      total: failed + summary.written.len(),
    })
    .wrap_err("Build finished with errors");
  }

  info!("Built {} pages", summary.written.len());
  Ok(())
}
