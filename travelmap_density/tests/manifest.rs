// Copyright 2025 the Travelmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loading photos from a processing-pipeline `manifest.json`.

#![cfg(feature = "serde")]

use travelmap_density::{MediaKind, Photo};

const MANIFEST: &str = r#"[
  {
    "lat": 38.7223,
    "lng": -9.1393,
    "url": "photos/IMG_0001.HEIC",
    "thumbnail": "thumbs/IMG_0001.jpg",
    "caption": "Alfama at dusk",
    "date": "2024-05-02",
    "tags": ["lisbon", "evening"],
    "google_photos_url": "https://drive.google.com/file/d/abc/view",
    "web_url": "https://drive.google.com/uc?id=abc",
    "type": "photo"
  },
  {
    "lat": 38.7139,
    "lng": -9.1334,
    "url": "photos/VID_0002.MOV",
    "thumbnail": "thumbs/VID_0002.jpg",
    "caption": "",
    "date": null,
    "tags": [],
    "type": "video"
  },
  {
    "lat": 41.1579,
    "lng": -8.6291,
    "url": "photos/porto.jpg",
    "type": "image"
  }
]"#;

#[test]
fn manifest_entries_deserialize() {
    let photos: Vec<Photo> = serde_json::from_str(MANIFEST).unwrap();
    assert_eq!(photos.len(), 3);

    let first = &photos[0];
    assert_eq!(first.identity_key(), "photos/IMG_0001.HEIC|38.7223|-9.1393");
    assert_eq!(first.kind, MediaKind::Photo);
    assert!(first.has_caption());
    assert_eq!(first.tags, ["lisbon", "evening"]);
    assert_eq!(first.date.as_deref(), Some("2024-05-02"));
    assert!(!first.is_favorite);

    let video = &photos[1];
    assert_eq!(video.kind, MediaKind::Video);
    assert!(!video.has_caption());
    assert_eq!(video.date, None);
    assert_eq!(video.web_url, None);

    assert_eq!(photos[2].kind, MediaKind::Photo);
    assert!(photos[2].thumbnail.is_empty());
}

#[test]
fn favorite_flag_is_not_written_back() {
    let photo = Photo::new("photos/a.jpg", 1.0, 2.0).with_favorite(true);
    let json = serde_json::to_string(&photo).unwrap();
    assert!(!json.contains("favorite"));
    assert!(json.contains(r#""type":"photo""#));

    let back: Photo = serde_json::from_str(&json).unwrap();
    assert!(!back.is_favorite);
    assert_eq!(back.identity_key(), photo.identity_key());
}
