use tracing::debug;

use crate::palettes::collection::PaletteCollection;
use crate::palettes::palette::{Color, Palette};

/// The editing side of a palette widget, without any of the drawing.
///
/// The editor works on a copy of the current collection row. Edits make that
/// copy dirty, [PaletteEditor::save] writes it back to the collection and
/// clears the flag again. Switching rows throws unsaved edits away without
/// asking; warning the user is up to whoever calls [PaletteEditor::set_current].
#[derive(Debug, Default)]
pub struct PaletteEditor {
	collection: PaletteCollection,
	current: Option<usize>,
	working: Palette,
	selected: Option<usize>,
	read_only: bool,
}

impl PaletteEditor {
	pub fn new(collection: PaletteCollection) -> Self {
		Self { collection, ..Default::default() }
	}

	pub fn collection(&self) -> &PaletteCollection {
		&self.collection
	}

	pub fn collection_mut(&mut self) -> &mut PaletteCollection {
		&mut self.collection
	}

	pub fn current(&self) -> Option<usize> {
		self.current
	}

	/// Switches to another row, replacing the working copy.
	pub fn set_current(&mut self, index: Option<usize>) {
		let index = index.filter(|&i| i < self.collection.len());
		if self.working.dirty() {
			debug!("discarding unsaved changes to \"{}\"", self.working.display_name());
		}

		let palette = index.map(|i| self.collection.palette(i)).unwrap_or_default();
		self.working.assign(&palette);
		self.current = index;
		self.selected = None;
	}

	pub fn palette(&self) -> &Palette {
		&self.working
	}

	pub fn palette_mut(&mut self) -> &mut Palette {
		&mut self.working
	}

	pub fn read_only(&self) -> bool {
		self.read_only
	}

	pub fn set_read_only(&mut self, read_only: bool) {
		self.read_only = read_only;
	}

	pub fn selected(&self) -> Option<usize> {
		self.selected
	}

	pub fn selected_color(&self) -> Option<Color> {
		self.selected.and_then(|i| self.working.get(i)).map(|e| e.color)
	}

	/// Selects a color index. Out-of-range indices clear the selection.
	pub fn set_selected(&mut self, index: Option<usize>) {
		self.selected = index.filter(|&i| i < self.working.len());
	}

	/// Appends a color to the working copy and selects it.
	pub fn add_color(&mut self, color: Color) -> bool {
		if self.read_only || self.current.is_none() {
			return false;
		}

		self.working.append_color(color);
		self.selected = Some(self.working.len() - 1);
		true
	}

	/// Replaces the color of the selected entry, keeping its name.
	pub fn set_selected_color(&mut self, color: Color) -> bool {
		match self.selected {
			Some(i) if !self.read_only => {
				self.working.set_color_at(i, color);
				true
			}
			_ => false,
		}
	}

	pub fn remove_selected(&mut self) -> bool {
		match self.selected {
			Some(i) if !self.read_only => {
				self.working.erase_color(i);
				self.selected = None;
				true
			}
			_ => false,
		}
	}

	/// Writes the working copy back into the collection (and to disk).
	/// Does nothing unless there are unsaved changes.
	pub fn save(&mut self) -> bool {
		let Some(row) = self.current else { return false };
		if self.read_only || !self.working.dirty() {
			return false;
		}

		if self.collection.update_palette(row, &self.working, true) {
			// the collection may have picked a file name for it
			let file_name = self.collection.get(row).and_then(|p| p.file_name().cloned());
			self.working.set_file_name(file_name);
			self.working.set_dirty(false);
			return true;
		}

		false
	}

	/// Removes the current row from the collection and clears the editor.
	pub fn delete_current(&mut self) -> bool {
		let Some(row) = self.current else { return false };
		if self.read_only || !self.collection.remove_row(row) {
			return false;
		}

		self.set_current(None);
		true
	}

	/// Selects the first entry with this color.
	pub fn select_color(&mut self, color: Color) -> bool {
		self.selected = self.working.colors().iter().position(|e| e.color == color);
		self.selected.is_some()
	}

	/// Selects the first entry with this name.
	pub fn select_name(&mut self, name: &str) -> bool {
		self.selected = self.working.colors().iter().position(|e| e.name == name);
		self.selected.is_some()
	}
}
