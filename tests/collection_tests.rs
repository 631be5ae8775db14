use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use swatchbook::palettes::collection::PaletteCollection;
use swatchbook::palettes::events::CollectionEvent;
use swatchbook::palettes::palette::{Color, Palette};

fn fixtures_dir() -> PathBuf {
	PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/palettes")
}

fn collection_of(names: &[&str]) -> PaletteCollection {
	let mut collection = PaletteCollection::new();
	for name in names {
		collection.add_palette(Palette::from_colors(vec![Color::new(1, 2, 3)], *name, 0), false).unwrap();
	}
	collection
}

#[test]
fn load_reads_every_gpl_file_and_skips_broken_ones() {
	let mut collection = PaletteCollection::new();
	collection.add_search_path(fixtures_dir());
	collection.add_search_path(fixtures_dir().join("missing"));

	// basic, commented, crlf, latin1, lenient; broken_header is skipped
	assert_eq!(collection.load(), 5);
	assert_eq!(collection.row_count(), 5);
	assert_eq!(collection.display_name(0).as_deref(), Some("Test"));
	assert_eq!(collection.index_of_file(fixtures_dir().join("crlf.gpl")), Some(2));
	assert!(collection.iter().all(|p| !p.dirty()));
}

#[test]
fn load_replaces_previous_rows() {
	let mut collection = collection_of(&["Stale"]);
	let dir = tempfile::tempdir().unwrap();
	collection.set_search_paths(vec![dir.path().to_path_buf()]);

	assert_eq!(collection.load(), 0);
	assert!(collection.is_empty());
}

#[test]
fn out_of_range_rows() {
	let mut collection = collection_of(&["A"]);

	assert!(collection.get(1).is_none());
	assert_eq!(collection.palette(1), Palette::default());
	assert_eq!(collection.display_name(1), None);
	assert_eq!(collection.tooltip(1), None);
	assert!(!collection.remove_row(1));
	assert!(!collection.rename(1, "B"));
	assert!(!collection.update_palette(1, &Palette::new("B"), false));
	assert_eq!(collection.len(), 1);
}

#[test]
fn rows_expose_names_and_tooltips() {
	let collection = collection_of(&["", "Warm"]);

	assert_eq!(collection.display_name(0).as_deref(), Some("Unnamed"));
	assert_eq!(collection.tooltip(1).as_deref(), Some("Warm (1 colors)"));
}

#[test]
fn palette_returns_a_deep_copy() {
	let collection = collection_of(&["A"]);

	let mut copy = collection.palette(0);
	copy.append_color(Color::new(9, 9, 9));

	assert_eq!(collection.get(0).map(|p| p.len()), Some(1));
}

#[test]
fn remove_and_rename() {
	let mut collection = collection_of(&["A", "B", "C"]);

	assert!(collection.remove_row(1));
	assert_eq!(collection.display_name(1).as_deref(), Some("C"));

	assert!(collection.rename(0, "Renamed"));
	assert_eq!(collection.display_name(0).as_deref(), Some("Renamed"));
}

#[test]
fn update_replaces_and_marks_clean() {
	let mut collection = collection_of(&["A"]);

	let mut edited = collection.palette(0);
	edited.append_color(Color::new(4, 5, 6));
	assert!(edited.dirty());

	assert!(collection.update_palette(0, &edited, false));

	let stored = collection.get(0).unwrap();
	assert_eq!(stored.len(), 2);
	assert!(!stored.dirty());
	// the caller's copy is its own business
	assert!(edited.dirty());
}

#[test]
fn update_with_save_writes_into_save_path() {
	let dir = tempfile::tempdir().unwrap();
	let mut collection = collection_of(&["Fresh"]);
	collection.set_save_path(dir.path());

	let mut edited = collection.palette(0);
	edited.set_name_at(0, "Named");
	assert!(collection.update_palette(0, &edited, true));

	let expected = dir.path().join("Fresh.gpl");
	assert_eq!(collection.get(0).unwrap().file_name(), Some(&expected));
	let reread = Palette::from_gpl_file(&expected).unwrap();
	assert_eq!(reread.name_at(0), "Named");
}

#[test]
fn update_with_failed_save_keeps_the_row() {
	let dir = tempfile::tempdir().unwrap();
	let mut collection = collection_of(&["A"]);

	let mut edited = collection.palette(0);
	edited.set_file_name(Some(dir.path().join("no/such/dir/a.gpl")));
	edited.append_color(Color::new(7, 7, 7));

	assert!(!collection.update_palette(0, &edited, true));
	assert_eq!(collection.get(0).unwrap().len(), 1);
}

#[test]
fn add_with_save_derives_file_name() {
	let dir = tempfile::tempdir().unwrap();
	let mut collection = PaletteCollection::new();
	collection.add_search_path(dir.path());

	let row = collection.add_palette(Palette::new("Saved"), true).unwrap();

	let stored = collection.get(row).unwrap();
	assert_eq!(stored.file_name(), Some(&dir.path().join("Saved.gpl")));
	assert!(fs::read_to_string(dir.path().join("Saved.gpl")).unwrap().starts_with("GIMP Palette\nName: Saved\n"));

	assert_eq!(collection.load(), 1);
}

#[test]
fn add_with_save_never_overwrites_another_palette() {
	let dir = tempfile::tempdir().unwrap();
	let mut collection = PaletteCollection::new();
	collection.set_save_path(dir.path());

	let full = Palette::from_colors(vec![Color::new(1, 1, 1); 5], "Same", 0);
	collection.add_palette(full, true).unwrap();
	collection.add_palette(Palette::new("Same"), true).unwrap();
	collection.add_palette(Palette::new("Same"), true).unwrap();

	assert_eq!(collection.get(0).unwrap().file_name(), Some(&dir.path().join("Same.gpl")));
	assert_eq!(collection.get(1).unwrap().file_name(), Some(&dir.path().join("Same 1.gpl")));
	assert_eq!(collection.get(2).unwrap().file_name(), Some(&dir.path().join("Same 2.gpl")));
	assert_eq!(Palette::from_gpl_file(dir.path().join("Same.gpl")).unwrap().len(), 5);
}

#[test]
fn save_path_fallbacks() {
	let mut collection = PaletteCollection::new();
	assert_eq!(collection.save_path(), PathBuf::from("."));

	collection.add_search_path("/palettes/a");
	assert_eq!(collection.save_path(), PathBuf::from("/palettes/a"));

	collection.set_save_path("/palettes/out");
	assert_eq!(collection.save_path(), PathBuf::from("/palettes/out"));
}

#[test]
fn collection_events() {
	let events = Rc::new(RefCell::new(Vec::new()));
	let sink = Rc::clone(&events);

	let mut collection = PaletteCollection::new();
	collection.subscribe(move |e| sink.borrow_mut().push(*e));

	collection.add_palette(Palette::new("A"), false).unwrap();
	collection.add_palette(Palette::new("B"), false).unwrap();
	collection.rename(1, "C");
	collection.update_palette(0, &Palette::new("D"), false);
	collection.remove_row(0);

	assert_eq!(*events.borrow(), vec![
		CollectionEvent::RowsInserted(0),
		CollectionEvent::RowsInserted(1),
		CollectionEvent::DataChanged(1),
		CollectionEvent::DataChanged(0),
		CollectionEvent::RowsRemoved(0),
	]);
}
