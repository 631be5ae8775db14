use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::palettes::events::{CollectionEvent, Observers, SubscriptionId};
use crate::palettes::palette::{Palette, PaletteError};
use crate::palettes::GPL_EXTENSION;

/// An ordered list of palettes, addressed by row like a list view model.
///
/// Palettes are read from a set of search paths and written back either to
/// their own file or, when they don't have one yet, into the save path.
#[derive(Debug, Default)]
pub struct PaletteCollection {
	palettes: Vec<Palette>,
	search_paths: Vec<PathBuf>,
	save_path: Option<PathBuf>,
	observers: Observers<CollectionEvent>,
}

impl PaletteCollection {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn subscribe<F: FnMut(&CollectionEvent) + 'static>(&mut self, callback: F) -> SubscriptionId {
		self.observers.subscribe(callback)
	}

	pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
		self.observers.unsubscribe(id)
	}

	pub fn row_count(&self) -> usize {
		self.palettes.len()
	}

	pub fn len(&self) -> usize {
		self.palettes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.palettes.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Palette> {
		self.palettes.iter()
	}

	pub fn get(&self, index: usize) -> Option<&Palette> {
		self.palettes.get(index)
	}

	/// A copy of the palette at `index`, or an empty palette if there is none.
	pub fn palette(&self, index: usize) -> Palette {
		self.get(index).cloned().unwrap_or_default()
	}

	pub fn display_name(&self, index: usize) -> Option<String> {
		self.get(index).map(|p| p.display_name().to_string())
	}

	pub fn tooltip(&self, index: usize) -> Option<String> {
		self.get(index).map(|p| format!("{} ({} colors)", p.display_name(), p.len()))
	}

	pub fn index_of_file<P: AsRef<Path>>(&self, path: P) -> Option<usize> {
		let path = path.as_ref();
		self.palettes.iter().position(|p| p.file_name().is_some_and(|f| f == path))
	}

	pub fn rename<S: Into<String>>(&mut self, index: usize, name: S) -> bool {
		let Some(palette) = self.palettes.get_mut(index) else { return false };
		palette.set_name(name);
		self.observers.emit(&CollectionEvent::DataChanged(index));
		true
	}

	pub fn search_paths(&self) -> &[PathBuf] {
		&self.search_paths
	}

	pub fn set_search_paths(&mut self, paths: Vec<PathBuf>) {
		self.search_paths = paths;
	}

	pub fn add_search_path<P: Into<PathBuf>>(&mut self, path: P) {
		self.search_paths.push(path.into());
	}

	/// Directory new palette files are written to. Falls back to the first
	/// search path, then to the working directory.
	pub fn save_path(&self) -> PathBuf {
		self.save_path.clone()
			.or_else(|| self.search_paths.first().cloned())
			.unwrap_or_else(|| PathBuf::from("."))
	}

	pub fn set_save_path<P: Into<PathBuf>>(&mut self, path: P) {
		self.save_path = Some(path.into());
	}

	/// Drops every palette and reads all `.gpl` files found in the search paths.
	/// Files that can't be read are skipped. Returns the number of palettes loaded.
	pub fn load(&mut self) -> usize {
		self.palettes.clear();

		for dir in &self.search_paths {
			let entries = match fs::read_dir(dir) {
				Ok(entries) => entries,
				Err(e) => {
					warn!("can't read palette directory {}: {e}", dir.display());
					continue;
				}
			};

			let mut files = entries
				.filter_map(|e| e.ok())
				.map(|e| e.path())
				.filter(|p| is_gpl_file(p))
				.collect::<Vec<PathBuf>>();
			files.sort();

			for file in files {
				match Palette::from_gpl_file(&file) {
					Ok(palette) => self.palettes.push(palette),
					Err(e) => warn!("skipping {}: {e}", file.display()),
				}
			}
		}

		info!("loaded {} palettes from {} search paths", self.palettes.len(), self.search_paths.len());
		self.observers.emit(&CollectionEvent::Reset);
		self.palettes.len()
	}

	/// Appends `palette` and returns its row. With `save`, the palette is
	/// written first and not added if that fails.
	pub fn add_palette(&mut self, mut palette: Palette, save: bool) -> Result<usize, PaletteError> {
		if save {
			self.save_palette(&mut palette, None)?;
		}

		self.palettes.push(palette);
		let row = self.palettes.len() - 1;
		self.observers.emit(&CollectionEvent::RowsInserted(row));
		Ok(row)
	}

	/// Removes the row from the model. The backing file is left alone.
	pub fn remove_row(&mut self, index: usize) -> bool {
		if index >= self.palettes.len() {
			return false;
		}

		let removed = self.palettes.remove(index);
		debug!("removed palette \"{}\" at row {index}", removed.display_name());
		self.observers.emit(&CollectionEvent::RowsRemoved(index));
		true
	}

	/// Replaces the palette at `index` with a copy of `palette` and marks the
	/// stored copy clean. With `save`, the palette is written first and the
	/// row stays untouched if that fails.
	///
	/// The caller owns `palette` and is responsible for clearing its dirty flag
	/// when this returns `true`.
	pub fn update_palette(&mut self, index: usize, palette: &Palette, save: bool) -> bool {
		let Some(current) = self.palettes.get(index) else { return false };

		let mut stored = palette.clone();
		if save {
			let fallback = current.file_name().cloned();
			if let Err(e) = self.save_palette(&mut stored, fallback) {
				warn!("can't save palette \"{}\": {e}", stored.display_name());
				return false;
			}
		}

		stored.set_dirty(false);
		self.palettes[index] = stored;
		self.observers.emit(&CollectionEvent::DataChanged(index));
		true
	}

	/// Writes `palette` to its own file name, else to `fallback`, else to a
	/// file derived from its name inside the save path.
	fn save_palette(&self, palette: &mut Palette, fallback: Option<PathBuf>) -> Result<(), PaletteError> {
		if palette.file_name().is_none() {
			let path = fallback.unwrap_or_else(|| unused_file_name(&self.save_path(), palette.display_name()));
			palette.set_file_name(Some(path));
		}

		palette.save()?;
		palette.set_dirty(false);
		Ok(())
	}
}

/// `<dir>/<name>.gpl`, or `<dir>/<name> N.gpl` with the first N that isn't taken.
fn unused_file_name(dir: &Path, name: &str) -> PathBuf {
	let path = dir.join(format!("{name}.{GPL_EXTENSION}"));
	if !path.exists() {
		return path;
	}

	(1..)
		.map(|n| dir.join(format!("{name} {n}.{GPL_EXTENSION}")))
		.find(|p| !p.exists())
		.unwrap_or(path)
}

fn is_gpl_file(path: &Path) -> bool {
	path.is_file()
		&& path.extension()
			.and_then(|e| e.to_str())
			.is_some_and(|ext| ext.eq_ignore_ascii_case(GPL_EXTENSION))
}
