use super::*;
use std::fs;
use tempfile::tempdir;

fn locator() -> ArtworkLocator {
    ArtworkLocator::new(&ArtworkSettings::default())
}

#[test]
fn matches_extensions_case_insensitively() {
    let l = locator();
    assert!(l.is_image("cover.jpg"));
    assert!(l.is_image("cover.JPG"));
    assert!(l.is_image("Folder.Jpeg"));
    assert!(l.is_image("front.png"));
    assert!(!l.is_image("notes.txt"));
    assert!(!l.is_image("jpg"));
    assert!(!l.is_image("cover.jpg.bak"));
}

#[test]
fn finds_uppercase_jpg_and_ignores_other_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("cover.JPG"), b"img").unwrap();
    fs::write(dir.path().join("notes.txt"), b"text").unwrap();
    let track = dir.path().join("01.flac");
    fs::write(&track, b"audio").unwrap();

    assert_eq!(locator().find_cover(&track), Some(dir.path().join("cover.JPG")));
}

#[test]
fn returns_none_without_images() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), b"text").unwrap();
    let track = dir.path().join("01.flac");

    assert_eq!(locator().find_cover(&track), None);
}

#[test]
fn returns_none_when_parent_is_missing() {
    let dir = tempdir().unwrap();
    let track = dir.path().join("gone").join("01.flac");
    assert_eq!(locator().find_cover(&track), None);
}

#[test]
fn never_descends_into_subdirectories() {
    let dir = tempdir().unwrap();
    let scans = dir.path().join("Scans");
    fs::create_dir_all(&scans).unwrap();
    fs::write(scans.join("front.png"), b"img").unwrap();
    let track = dir.path().join("01.flac");

    assert_eq!(locator().find_cover(&track), None);
}

#[test]
fn directory_named_like_an_image_is_skipped() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("art.png")).unwrap();
    let track = dir.path().join("01.flac");

    assert_eq!(locator().find_cover(&track), None);
}

#[test]
fn lexical_selection_is_deterministic() {
    let dir = tempdir().unwrap();
    for name in ["zz-back.png", "b-cover.jpg", "a-front.jpeg"] {
        fs::write(dir.path().join(name), b"img").unwrap();
    }
    let track = dir.path().join("01.flac");

    let settings = ArtworkSettings {
        selection: ArtworkSelection::Lexical,
        ..ArtworkSettings::default()
    };
    let l = ArtworkLocator::new(&settings);
    assert_eq!(l.find_cover(&track), Some(dir.path().join("a-front.jpeg")));
}

#[test]
fn configured_extensions_are_normalized() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("cover.WebP"), b"img").unwrap();
    fs::write(dir.path().join("cover.jpg"), b"img").unwrap();
    let track = dir.path().join("01.flac");

    let settings = ArtworkSettings {
        extensions: vec![" .webp ".into(), "".into()],
        ..ArtworkSettings::default()
    };
    let l = ArtworkLocator::new(&settings);
    assert_eq!(l.find_cover(&track), Some(dir.path().join("cover.WebP")));
}
