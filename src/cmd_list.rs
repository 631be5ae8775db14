use crate::commands::ListArgs;
use crate::common::collection_from_config;
use anyhow::Result;
use colored::Colorize;
use swatchbook::config::Config;

pub(crate) fn palette_list(args: &ListArgs, config: &Config) -> Result<()> {
	let mut collection = collection_from_config(config);
	if !args.dirs.is_empty() {
		collection.set_search_paths(args.dirs.clone());
	}

	if collection.search_paths().is_empty() {
		anyhow::bail!("No search paths given and none configured");
	}

	if collection.load() == 0 {
		eprintln!("NOTE: No palettes found!");
		return Ok(());
	}

	let width = collection.row_count().saturating_sub(1).to_string().len();
	for (row, palette) in collection.iter().enumerate() {
		let file = palette.file_name().map(|f| f.display().to_string()).unwrap_or_default();
		println!("[{row:>width$}] {} ({} colors) {}", palette.display_name().bold(), palette.len(), file.dimmed());
	}

	Ok(())
}
