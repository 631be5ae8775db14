use clap::Parser;
use clap::Subcommand;
use std::path::PathBuf;

use swatchbook::palettes::palette::Color;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Reads, edits and lists GIMP palettes")]
pub(crate) struct Cli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	#[arg(long, global = true, help = "Enables debug logging.")]
	pub debug: bool,

	#[arg(long, global = true, help = "A TOML configuration file. (defaults to swatchbook.toml if present)")]
	pub config: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub(crate) struct ShowArgs {
	#[arg(help = "The palette file.")]
	pub input: PathBuf,

	#[arg(long, help = "Prints the palette as JSON.")]
	pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub(crate) struct NewArgs {
	#[arg(help = "The palette name.")]
	pub name: String,

	#[arg(short, long, help = "The number of columns, 0 for unspecified.", allow_negative_numbers = true, default_value_t = 0)]
	pub columns: i64,

	#[arg(short, long, help = "The output file. (defaults to <name>.gpl in the save path)")]
	pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub(crate) struct AddArgs {
	#[arg(help = "The palette file.")]
	pub file: PathBuf,
	#[arg(help = "The color, as #RRGGBB.")]
	pub color: Color,
	#[arg(help = "The color name.")]
	pub name: Option<String>,

	#[arg(long, help = "Inserts the color before this index instead of appending it.")]
	pub at: Option<usize>,
}

#[derive(Parser, Debug, Clone)]
pub(crate) struct RemoveArgs {
	#[arg(help = "The palette file.")]
	pub file: PathBuf,
	#[arg(help = "The index of the color to remove.")]
	pub index: usize,
}

#[derive(Parser, Debug, Clone)]
pub(crate) struct RenameColorArgs {
	#[arg(help = "The palette file.")]
	pub file: PathBuf,
	#[arg(help = "The index of the color to rename.")]
	pub index: usize,
	#[arg(help = "The new name. (empty for none)")]
	pub name: String,
}

#[derive(Parser, Debug, Clone)]
pub(crate) struct SetColorArgs {
	#[arg(help = "The palette file.")]
	pub file: PathBuf,
	#[arg(help = "The index of the color to change.")]
	pub index: usize,
	#[arg(help = "The new color, as #RRGGBB.")]
	pub color: Color,
}

#[derive(Parser, Debug, Clone)]
pub(crate) struct ColumnsArgs {
	#[arg(help = "The palette file.")]
	pub file: PathBuf,
	#[arg(help = "The number of columns, 0 or less for unspecified.", allow_negative_numbers = true)]
	pub columns: i64,
}

#[derive(Parser, Debug, Clone)]
pub(crate) struct ListArgs {
	#[arg(help = "Directories to search for palettes. (defaults to the configured search paths)")]
	pub dirs: Vec<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Commands {
	#[command(about = "Prints a palette")]
	Show(ShowArgs),

	#[command(about = "Creates an empty palette")]
	New(NewArgs),

	#[command(about = "Adds a color to a palette")]
	Add(AddArgs),

	#[command(about = "Removes a color from a palette")]
	Remove(RemoveArgs),

	#[command(about = "Renames a color in a palette")]
	RenameColor(RenameColorArgs),

	#[command(about = "Changes a color in a palette")]
	SetColor(SetColorArgs),

	#[command(about = "Changes the column count of a palette")]
	Columns(ColumnsArgs),

	#[command(about = "Lists the palettes found in the search paths")]
	List(ListArgs),
}
