use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::palettes::palette::{normalize_columns, unnamed, Color, Entry, Palette, PaletteError};
use crate::palettes::GPL_EXTENSION;

// https://developer.gimp.org/core/standards/gpl/

const GIMP_MAGIC: &str = "GIMP Palette";
const UTF8_BOM: char = '\u{feff}';

// every field is optional, anything missing or unparseable ends up as 0
static COLOR_LINE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^\s*(?P<r>\S+)?\s*(?P<g>\S+)?\s*(?P<b>\S+)?\s*(?P<name>.*)$").expect("color line regex")
});

/// Reads a GIMP palette.
///
/// Parsing is lenient past the header: color components that are missing or
/// not integers are read as 0, lines without a colon in the property block
/// are ignored and invalid UTF-8 is replaced. A leading byte order mark is
/// skipped. Only the `Name` and `Columns` properties are kept.
pub fn decode<R: BufRead>(mut reader: R) -> Result<Palette, PaletteError> {
	let magic = read_line(&mut reader)?.unwrap_or_default();
	let magic = magic.strip_prefix(UTF8_BOM).unwrap_or(&magic);
	if magic != GIMP_MAGIC {
		return Err(PaletteError::BadHeader { found: magic.to_string() });
	}

	let mut pal = Palette::default();
	let mut in_properties = true;

	while let Some(line) = read_line(&mut reader)? {
		if in_properties {
			if line.is_empty() {
				continue;
			}
			if line.starts_with('#') {
				in_properties = false;
				continue;
			}
			if let Some((key, value)) = line.split_once(':') {
				let value = value.trim();
				match key.trim().to_lowercase().as_str() {
					"name" => pal.name = value.to_string(),
					"columns" => pal.columns = normalize_columns(value.parse::<i64>().unwrap_or(0)),
					other => debug!("ignoring palette property \"{other}\""),
				}
			}
			continue;
		}

		if line.trim().is_empty() || line.starts_with('#') {
			continue;
		}

		pal.colors.push(parse_color_line(&line));
	}

	Ok(pal)
}

/// Reads one line without its `\n` or `\r\n` terminator. Bytes that aren't
/// valid UTF-8 (old Latin-1 palettes) are replaced instead of failing the read.
fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>, PaletteError> {
	let mut buf = Vec::new();
	if reader.read_until(b'\n', &mut buf)? == 0 {
		return Ok(None);
	}

	if buf.last() == Some(&b'\n') {
		buf.pop();
		if buf.last() == Some(&b'\r') {
			buf.pop();
		}
	}

	Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

fn parse_color_line(line: &str) -> Entry {
	let Some(groups) = COLOR_LINE.captures(line) else {
		return Entry::default();
	};

	let component = |name: &str| {
		groups.name(name)
			.and_then(|m| m.as_str().parse::<i32>().ok())
			.unwrap_or(0)
	};
	let name = groups.name("name").map(|m| m.as_str().trim()).unwrap_or("");

	Entry::new(Color::new(component("r"), component("g"), component("b")), name)
}

/// Writes `palette` as a GIMP palette. Empty names are written as "Unnamed".
pub fn encode<W: Write>(palette: &Palette, mut writer: W) -> std::io::Result<()> {
	writeln!(writer, "{GIMP_MAGIC}")?;
	writeln!(writer, "Name: {}", palette.display_name())?;
	if palette.columns() != 0 {
		writeln!(writer, "Columns: {}", palette.columns())?;
	}
	writeln!(writer, "#")?;

	for entry in palette.colors() {
		let Color { r, g, b } = entry.color;
		writeln!(writer, "{r:>3} {g:>3} {b:>3}\t{}", unnamed(&entry.name))?;
	}

	writer.flush()
}

impl Palette {
	pub fn from_gpl_string<S: Into<String>>(s: S) -> Result<Palette, PaletteError> {
		let s = s.into();
		decode(BufReader::new(s.as_bytes()))
	}

	/// Reads a palette from `path`; the path is remembered as its file name.
	pub fn from_gpl_file<P: AsRef<Path>>(path: P) -> Result<Palette, PaletteError> {
		let mut pal = Palette::default();
		pal.load(path)?;
		Ok(pal)
	}

	/// Replaces the contents of this palette with those of the file at `path`.
	///
	/// The file name is set and the palette cleared before the file is even
	/// opened, so a failed load leaves an empty, unnamed palette that remembers
	/// which file it tried to read.
	pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), PaletteError> {
		let path = path.as_ref();
		self.set_file_name(Some(path.to_path_buf()));
		self.clear_for_load();

		let f = File::open(path).map_err(|source| PaletteError::OpenFailed { path: path.to_path_buf(), source })?;
		let decoded = decode(BufReader::new(f))?;
		debug!("loaded {} colors from {}", decoded.len(), path.display());

		self.apply_decoded(decoded);
		Ok(())
	}

	pub fn to_gpl_string(&self) -> String {
		let mut buf = Vec::new();
		// writing into a Vec can't fail
		let _ = encode(self, &mut buf);
		String::from_utf8_lossy(&buf).into_owned()
	}

	/// The file name used when none has been set: `<name>.gpl` in the working directory.
	pub fn default_file_name(&self) -> PathBuf {
		PathBuf::from(format!("{}.{GPL_EXTENSION}", self.display_name()))
	}

	/// Writes the palette to its file name, or to [Palette::default_file_name].
	/// Returns the path that was written.
	pub fn save(&self) -> Result<PathBuf, PaletteError> {
		let path = self.file_name.clone().unwrap_or_else(|| self.default_file_name());
		self.save_to(&path)?;
		Ok(path)
	}

	/// Changes the file name, then saves.
	pub fn save_as<P: Into<PathBuf>>(&mut self, path: P) -> Result<PathBuf, PaletteError> {
		self.set_file_name(Some(path.into()));
		self.save()
	}

	/// Writes to `path` without touching the stored file name.
	pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), PaletteError> {
		let path = path.as_ref();
		let f = File::create(path).map_err(|source| PaletteError::OpenFailed { path: path.to_path_buf(), source })?;

		encode(self, BufWriter::new(f)).map_err(|source| PaletteError::WriteFailed { path: path.to_path_buf(), source })?;

		info!("saved palette \"{}\" to {}", self.display_name(), path.display());
		Ok(())
	}
}
