use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::palettes::events::{Observers, PaletteEvent, SubscriptionId};
use crate::palettes::UNNAMED;

/// An RGB triplet. Components are kept exactly as given, values outside
/// `0..=255` are stored and written back unchanged.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Color {
	pub r: i32,
	pub g: i32,
	pub b: i32,
}

impl Color {
	pub const fn new(r: i32, g: i32, b: i32) -> Self {
		Self { r, g, b }
	}

	/// Parses `#RRGGBB`, `RRGGBB` or `0xRRGGBB`.
	pub fn from_hex(s: &str) -> Result<Color, PaletteError> {
		let trimmed = s.trim();
		let stripped = trimmed.strip_prefix("0x").unwrap_or(trimmed);
		let stripped = stripped.strip_prefix("#").unwrap_or(stripped);

		if stripped.len() != 6 {
			return Err(PaletteError::InvalidColor(s.to_string()));
		}

		u32::from_str_radix(stripped, 16)
			.map(Color::from)
			.map_err(|_| PaletteError::InvalidColor(s.to_string()))
	}

	fn clamped(&self) -> [u8; 3] {
		[self.r, self.g, self.b].map(|c| c.clamp(0, 255) as u8)
	}
}

impl From<[u8; 3]> for Color {
	fn from(v: [u8; 3]) -> Self {
		Self {
			r: v[0] as i32,
			g: v[1] as i32,
			b: v[2] as i32,
		}
	}
}

impl From<u32> for Color {
	fn from(v: u32) -> Self {
		Self {
			r: ((v >> 16) & 0xFF) as i32,
			g: ((v >> 8) & 0xFF) as i32,
			b: (v & 0xFF) as i32,
		}
	}
}

impl FromStr for Color {
	type Err = PaletteError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Color::from_hex(s)
	}
}

impl Display for Color {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let [r, g, b] = self.clamped();
		let rgb = ((r as u32) << 16) | ((g as u32) << 8) | b as u32;
		write!(f, "#{:06X}", rgb)
	}
}

#[derive(Clone, Default, Debug, PartialEq, Eq, Serialize)]
pub struct Entry {
	pub color: Color,
	pub name: String,
}

impl Entry {
	pub fn new<S: Into<String>>(color: Color, name: S) -> Self {
		Self { color, name: name.into() }
	}
}

#[derive(Debug, Error)]
pub enum PaletteError {
	#[error("not a GIMP palette, first line is \"{found}\"")]
	BadHeader { found: String },
	#[error("can't open {}: {source}", .path.display())]
	OpenFailed { path: PathBuf, source: std::io::Error },
	#[error("can't write {}: {source}", .path.display())]
	WriteFailed { path: PathBuf, source: std::io::Error },
	#[error("\"{0}\" is not a valid hexadecimal color value")]
	InvalidColor(String),
	#[error("io error: {0}")]
	Io(#[from] std::io::Error),
}

/// A named, ordered list of colors with an optional column count.
///
/// The list can only be changed through the methods below. Each change
/// notifies subscribers with the complete new list and marks the palette
/// dirty. Index based accessors and mutators ignore out-of-range indices.
#[derive(Default, Serialize)]
pub struct Palette {
	pub(crate) name: String,
	pub(crate) columns: u32,
	pub(crate) file_name: Option<PathBuf>,
	pub(crate) colors: Vec<Entry>,
	#[serde(skip)]
	pub(crate) dirty: bool,
	#[serde(skip)]
	observers: Observers<PaletteEvent>,
}

impl Clone for Palette {
	/// Deep copy of the palette data. Subscribers are not carried over.
	fn clone(&self) -> Self {
		Self {
			name: self.name.clone(),
			columns: self.columns,
			file_name: self.file_name.clone(),
			colors: self.colors.clone(),
			dirty: self.dirty,
			observers: Observers::default(),
		}
	}
}

impl PartialEq for Palette {
	fn eq(&self, other: &Self) -> bool {
		self.name == other.name
			&& self.columns == other.columns
			&& self.file_name == other.file_name
			&& self.colors == other.colors
	}
}

impl std::fmt::Debug for Palette {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Palette")
			.field("name", &self.name)
			.field("columns", &self.columns)
			.field("file_name", &self.file_name)
			.field("colors", &self.colors)
			.field("dirty", &self.dirty)
			.finish()
	}
}

impl Palette {
	pub fn new<S: Into<String>>(name: S) -> Self {
		Self { name: name.into(), ..Default::default() }
	}

	pub fn from_colors<S: Into<String>>(colors: Vec<Color>, name: S, columns: i64) -> Self {
		Self::from_entries(colors.into_iter().map(|c| Entry::new(c, "")).collect(), name, columns)
	}

	pub fn from_entries<S: Into<String>>(colors: Vec<Entry>, name: S, columns: i64) -> Self {
		Self {
			name: name.into(),
			columns: normalize_columns(columns),
			colors,
			..Default::default()
		}
	}

	pub fn subscribe<F: FnMut(&PaletteEvent) + 'static>(&mut self, callback: F) -> SubscriptionId {
		self.observers.subscribe(callback)
	}

	pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
		self.observers.unsubscribe(id)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// The name as it's shown and written to disk.
	pub fn display_name(&self) -> &str {
		unnamed(&self.name)
	}

	pub fn columns(&self) -> u32 {
		self.columns
	}

	/// Rows needed to lay out every color, `None` if the column count is unspecified.
	pub fn rows(&self) -> Option<usize> {
		match self.columns {
			0 => None,
			c => Some(self.colors.len().div_ceil(c as usize)),
		}
	}

	pub fn file_name(&self) -> Option<&PathBuf> {
		self.file_name.as_ref()
	}

	pub fn dirty(&self) -> bool {
		self.dirty
	}

	pub fn len(&self) -> usize {
		self.colors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.colors.is_empty()
	}

	pub fn colors(&self) -> &[Entry] {
		&self.colors
	}

	pub fn names(&self) -> Vec<String> {
		self.colors.iter().map(|e| e.name.clone()).collect()
	}

	pub fn get(&self, index: usize) -> Option<&Entry> {
		self.colors.get(index)
	}

	/// The color at `index`, or black if there is none.
	pub fn color_at(&self, index: usize) -> Color {
		self.get(index).map(|e| e.color).unwrap_or_default()
	}

	/// The name at `index`, or an empty string if there is none.
	pub fn name_at(&self, index: usize) -> &str {
		self.get(index).map(|e| e.name.as_str()).unwrap_or("")
	}

	pub fn set_name<S: Into<String>>(&mut self, name: S) {
		let name = name.into();
		if name == self.name {
			return;
		}
		self.name = name;
		self.observers.emit(&PaletteEvent::NameChanged(self.name.clone()));
		self.set_dirty(true);
	}

	/// Anything below 1 means "unspecified" and is stored as 0.
	pub fn set_columns(&mut self, columns: i64) {
		let columns = normalize_columns(columns);
		if columns == self.columns {
			return;
		}
		self.columns = columns;
		self.observers.emit(&PaletteEvent::ColumnsChanged(columns));
		self.set_dirty(true);
	}

	pub fn set_file_name(&mut self, file_name: Option<PathBuf>) {
		if file_name == self.file_name {
			return;
		}
		self.file_name = file_name;
		self.observers.emit(&PaletteEvent::FileNameChanged(self.file_name.clone()));
	}

	pub fn set_dirty(&mut self, dirty: bool) {
		if dirty == self.dirty {
			return;
		}
		self.dirty = dirty;
		self.observers.emit(&PaletteEvent::DirtyChanged(dirty));
	}

	pub fn set_colors(&mut self, colors: Vec<Color>) {
		self.colors = colors.into_iter().map(|c| Entry::new(c, "")).collect();
		self.colors_changed();
	}

	pub fn set_entries(&mut self, colors: Vec<Entry>) {
		self.colors = colors;
		self.colors_changed();
	}

	/// Replaces the color at `index`, keeping its name.
	pub fn set_color_at(&mut self, index: usize, color: Color) {
		let Some(entry) = self.colors.get_mut(index) else { return };
		entry.color = color;
		self.colors_changed();
	}

	pub fn set_named_color_at<S: Into<String>>(&mut self, index: usize, color: Color, name: S) {
		let Some(entry) = self.colors.get_mut(index) else { return };
		entry.color = color;
		entry.name = name.into();
		self.colors_changed();
	}

	pub fn set_name_at<S: Into<String>>(&mut self, index: usize, name: S) {
		let Some(entry) = self.colors.get_mut(index) else { return };
		entry.name = name.into();
		self.colors_changed();
	}

	pub fn append_color(&mut self, color: Color) {
		self.append_named_color(color, "");
	}

	pub fn append_named_color<S: Into<String>>(&mut self, color: Color, name: S) {
		self.colors.push(Entry::new(color, name));
		self.colors_changed();
	}

	/// Inserts before `index`. `index == len()` appends, anything past that is ignored.
	pub fn insert_color<S: Into<String>>(&mut self, index: usize, color: Color, name: S) {
		if index > self.colors.len() {
			return;
		}
		self.colors.insert(index, Entry::new(color, name));
		self.colors_changed();
	}

	pub fn erase_color(&mut self, index: usize) {
		if index >= self.colors.len() {
			return;
		}
		self.colors.remove(index);
		self.colors_changed();
	}

	/// Copies every property of `other` into `self` and re-emits all change
	/// notifications so subscribers can resynchronize. Subscribers of `self`
	/// stay attached.
	pub fn assign(&mut self, other: &Palette) {
		self.name = other.name.clone();
		self.columns = other.columns;
		self.file_name = other.file_name.clone();
		self.colors = other.colors.clone();
		self.dirty = other.dirty;

		self.observers.emit(&PaletteEvent::ColorsChanged(self.colors.clone()));
		self.observers.emit(&PaletteEvent::ColumnsChanged(self.columns));
		self.observers.emit(&PaletteEvent::NameChanged(self.name.clone()));
		self.observers.emit(&PaletteEvent::FileNameChanged(self.file_name.clone()));
		self.observers.emit(&PaletteEvent::DirtyChanged(self.dirty));
	}

	/// Resets everything but the file name, as done before reading a file.
	pub(crate) fn clear_for_load(&mut self) {
		self.colors.clear();
		self.observers.emit(&PaletteEvent::ColorsChanged(Vec::new()));
		if self.columns != 0 {
			self.columns = 0;
			self.observers.emit(&PaletteEvent::ColumnsChanged(0));
		}
		if !self.name.is_empty() {
			self.name.clear();
			self.observers.emit(&PaletteEvent::NameChanged(String::new()));
		}
		self.set_dirty(false);
	}

	/// Takes over the contents of a freshly decoded palette. The file name is kept.
	pub(crate) fn apply_decoded(&mut self, decoded: Palette) {
		if decoded.name != self.name {
			self.name = decoded.name;
			self.observers.emit(&PaletteEvent::NameChanged(self.name.clone()));
		}
		if decoded.columns != self.columns {
			self.columns = decoded.columns;
			self.observers.emit(&PaletteEvent::ColumnsChanged(self.columns));
		}
		self.colors = decoded.colors;
		self.emit_colors();
		self.set_dirty(false);
	}

	fn emit_colors(&mut self) {
		self.observers.emit(&PaletteEvent::ColorsChanged(self.colors.clone()));
	}

	fn colors_changed(&mut self) {
		self.set_dirty(true);
		self.emit_colors();
	}
}

pub(crate) fn normalize_columns(columns: i64) -> u32 {
	columns.clamp(0, u32::MAX as i64) as u32
}

/// Returns `name`, or the placeholder used for palettes and colors without one.
pub fn unnamed(name: &str) -> &str {
	if name.is_empty() { UNNAMED } else { name }
}

impl From<Vec<u32>> for Palette {
	fn from(v: Vec<u32>) -> Self {
		Palette::from_colors(v.into_iter().map(Color::from).collect(), "", 0)
	}
}

impl From<Vec<Color>> for Palette {
	fn from(v: Vec<Color>) -> Self {
		Palette::from_colors(v, "", 0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn color_display_clamps_out_of_range_components() {
		assert_eq!(Color::new(300, -4, 0x12).to_string(), "#FF0012");
		assert_eq!(Color::from(0x1E3D54).to_string(), "#1E3D54");
	}

	#[test]
	fn hex_parsing_accepts_common_prefixes() {
		assert_eq!(Color::from_hex("#ff0000").unwrap(), Color::new(255, 0, 0));
		assert_eq!(Color::from_hex("0x00FF00").unwrap(), Color::new(0, 255, 0));
		assert_eq!("0000ff".parse::<Color>().unwrap(), Color::new(0, 0, 255));
		assert!(Color::from_hex("#fff").is_err());
		assert!(Color::from_hex("banana").is_err());
	}

	#[test]
	fn columns_normalization() {
		assert_eq!(normalize_columns(-5), 0);
		assert_eq!(normalize_columns(0), 0);
		assert_eq!(normalize_columns(16), 16);
	}
}
