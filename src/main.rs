use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use humansize::DECIMAL;
use swatchbook::config::Config;
use swatchbook::logging::init_logging;

use crate::cmd_edit::{palette_add, palette_columns, palette_new, palette_remove, palette_rename_color, palette_set_color};
use crate::cmd_list::palette_list;
use crate::cmd_show::palette_show;
use crate::commands::{Cli, Commands};

mod cmd_edit;
mod cmd_list;
mod cmd_show;
mod commands;
mod common;

fn main() -> ExitCode {
	let cli = Cli::parse();

	let config = match Config::load(cli.config.as_deref()) {
		Ok(config) => config,
		Err(e) => {
			eprintln!("execution failed: {e}");
			return ExitCode::FAILURE;
		}
	};

	let level = if cli.debug { "debug" } else { config.log_level.as_str() };
	init_logging(level);

	let result: Result<Option<PathBuf>> = match &cli.command {
		Some(Commands::Show(args)) => palette_show(args).map(|_| None),
		Some(Commands::New(args)) => palette_new(args, &config),
		Some(Commands::Add(args)) => palette_add(args),
		Some(Commands::Remove(args)) => palette_remove(args),
		Some(Commands::RenameColor(args)) => palette_rename_color(args),
		Some(Commands::SetColor(args)) => palette_set_color(args),
		Some(Commands::Columns(args)) => palette_columns(args),
		Some(Commands::List(args)) => palette_list(args, &config).map(|_| None),
		None => {
			return ExitCode::FAILURE;
		}
	};

	match result {
		Ok(Some(output)) => {
			match fs::metadata(&output) {
				Ok(m) => {
					let size = humansize::format_size(m.len(), DECIMAL);
					println!("Wrote {} ({size})", output.display());
				}
				Err(err) => {
					eprintln!("Can't determine output file size: {err}");
				}
			}
			ExitCode::SUCCESS
		}
		Ok(None) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("execution failed: {e:#}");
			ExitCode::FAILURE
		}
	}
}
