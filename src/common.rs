use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use swatchbook::config::Config;
use swatchbook::palettes::collection::PaletteCollection;
use swatchbook::palettes::palette::Palette;
use tracing::debug;

/// Loads the palette at `path`, applies `edit` and saves it back if anything changed.
/// Returns the path that was written, if any.
pub(crate) fn edit_palette<F>(path: &Path, edit: F) -> Result<Option<PathBuf>>
where
	F: FnOnce(&mut Palette) -> Result<()>,
{
	let mut palette = Palette::from_gpl_file(path)
		.with_context(|| format!("Failed to read {}", path.display()))?;

	edit(&mut palette)?;

	if !palette.dirty() {
		debug!("{} is unchanged, not saving", path.display());
		return Ok(None);
	}

	let written = palette.save()
		.with_context(|| format!("Failed to write {}", path.display()))?;
	Ok(Some(written))
}

/// Fails with a readable message instead of silently ignoring an out-of-range index.
pub(crate) fn check_index(palette: &Palette, index: usize) -> Result<()> {
	if index >= palette.len() {
		anyhow::bail!("Index {index} is out of range, \"{}\" has {} colors", palette.display_name(), palette.len());
	}

	Ok(())
}

pub(crate) fn collection_from_config(config: &Config) -> PaletteCollection {
	let mut collection = PaletteCollection::new();
	config.apply(&mut collection);
	collection
}
