use crate::commands::ShowArgs;
use anyhow::{Context, Result};
use colored::Colorize;
use swatchbook::palettes::palette::{unnamed, Palette};

pub(crate) fn palette_show(args: &ShowArgs) -> Result<()> {
	let palette = Palette::from_gpl_file(&args.input)
		.with_context(|| format!("Failed to read {}", args.input.display()))?;

	if args.json {
		let json = serde_json::to_string_pretty(&palette).context("Failed to serialize palette to JSON")?;
		println!("{json}");
		return Ok(());
	}

	println!("{}", palette.display_name().bold());

	let mut info: Vec<String> = vec![format!("{} colors", palette.len())];
	if let Some(rows) = palette.rows() {
		info.push(format!("{} columns, {rows} rows", palette.columns()));
	}
	println!("{}", info.join(", ").dimmed());

	let width = palette.len().saturating_sub(1).to_string().len();
	for (i, entry) in palette.colors().iter().enumerate() {
		let [r, g, b] = [entry.color.r, entry.color.g, entry.color.b].map(|c| c.clamp(0, 255) as u8);
		println!("{i:>width$} {} {} {}", "   ".on_truecolor(r, g, b), entry.color, unnamed(&entry.name));
	}

	Ok(())
}
