//! Gallery storage behaviour against a real directory.

use std::fs;
use std::path::PathBuf;

use mars_mission::gallery::{GalleryError, GalleryStore};

fn scratch_dir(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "mars-mission-{label}-{:016x}",
        rand::random::<u64>()
    ))
}

#[test]
fn traversal_filename_lands_inside_upload_dir() {
    let root = scratch_dir("traversal");
    let gallery_dir = root.join("static").join("galery");
    let store = GalleryStore::new(&gallery_dir);

    let stored = store
        .store("../../evil.png", b"\x89PNG")
        .expect("upload stored");

    assert_eq!(stored, "evil.png");
    assert!(gallery_dir.join("evil.png").is_file());
    assert!(!root.join("evil.png").exists());
    assert!(!root.join("static").join("evil.png").exists());
    assert_eq!(store.list_images().expect("listing"), vec!["evil.png"]);

    fs::remove_dir_all(&root).ok();
}

#[test]
fn listing_tracks_uploads_and_overwrites() {
    let root = scratch_dir("listing");
    let store = GalleryStore::new(&root);

    store.store("crater.jpg", b"first").expect("first upload");
    store.store("dunes.PNG", b"second").expect("second upload");
    assert_eq!(
        store.list_images().expect("listing"),
        vec!["crater.jpg", "dunes.PNG"]
    );

    store.store("crater.jpg", b"replacement").expect("overwrite");
    let images = store.list_images().expect("listing");
    assert_eq!(images.iter().filter(|name| *name == "crater.jpg").count(), 1);
    assert_eq!(images.len(), 2);
    assert_eq!(
        fs::read(root.join("crater.jpg")).expect("file readable"),
        b"replacement"
    );

    fs::remove_dir_all(&root).ok();
}

#[test]
fn listing_skips_non_images_and_missing_dir() {
    let root = scratch_dir("filter");
    let store = GalleryStore::new(&root);
    assert!(store.list_images().expect("missing dir lists").is_empty());

    store.store("base.jpeg", b"img").expect("upload");
    fs::write(root.join("notes.txt"), b"log").expect("write note");

    assert_eq!(store.list_images().expect("listing"), vec!["base.jpeg"]);

    fs::remove_dir_all(&root).ok();
}

#[test]
fn rejects_names_that_sanitize_to_nothing() {
    let root = scratch_dir("reject");
    let store = GalleryStore::new(&root);

    let err = store.store("../..", b"img").expect_err("nothing left");
    assert!(matches!(err, GalleryError::InvalidFilename(_)));
    assert!(!root.exists());
}
