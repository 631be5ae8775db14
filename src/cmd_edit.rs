use crate::commands::{AddArgs, ColumnsArgs, NewArgs, RemoveArgs, RenameColorArgs, SetColorArgs};
use crate::common::{check_index, collection_from_config, edit_palette};
use anyhow::{Context, Result};
use std::path::PathBuf;
use swatchbook::config::Config;
use swatchbook::palettes::palette::Palette;

pub(crate) fn palette_new(args: &NewArgs, config: &Config) -> Result<Option<PathBuf>> {
	let palette = Palette::from_colors(Vec::new(), args.name.clone(), args.columns);

	if let Some(output) = &args.output {
		let mut palette = palette;
		let written = palette.save_as(output)
			.with_context(|| format!("Failed to write {}", output.display()))?;
		return Ok(Some(written));
	}

	let mut collection = collection_from_config(config);
	let row = collection.add_palette(palette, true).context("Failed to save the new palette")?;
	Ok(collection.get(row).and_then(|p| p.file_name().cloned()))
}

pub(crate) fn palette_add(args: &AddArgs) -> Result<Option<PathBuf>> {
	edit_palette(&args.file, |palette| {
		let name = args.name.clone().unwrap_or_default();
		match args.at {
			Some(at) if at > palette.len() => {
				anyhow::bail!("Can't insert at {at}, \"{}\" has {} colors", palette.display_name(), palette.len())
			}
			Some(at) => palette.insert_color(at, args.color, name),
			None => palette.append_named_color(args.color, name),
		}
		Ok(())
	})
}

pub(crate) fn palette_remove(args: &RemoveArgs) -> Result<Option<PathBuf>> {
	edit_palette(&args.file, |palette| {
		check_index(palette, args.index)?;
		palette.erase_color(args.index);
		Ok(())
	})
}

pub(crate) fn palette_rename_color(args: &RenameColorArgs) -> Result<Option<PathBuf>> {
	edit_palette(&args.file, |palette| {
		check_index(palette, args.index)?;
		palette.set_name_at(args.index, args.name.clone());
		Ok(())
	})
}

pub(crate) fn palette_set_color(args: &SetColorArgs) -> Result<Option<PathBuf>> {
	edit_palette(&args.file, |palette| {
		check_index(palette, args.index)?;
		palette.set_color_at(args.index, args.color);
		Ok(())
	})
}

pub(crate) fn palette_columns(args: &ColumnsArgs) -> Result<Option<PathBuf>> {
	edit_palette(&args.file, |palette| {
		palette.set_columns(args.columns);
		Ok(())
	})
}
