// Copyright 2025 the Travelmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Photo records and their identity keys.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;

use travelmap_view::LatLng;

/// Kind of media a [`Photo`] record points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MediaKind {
    /// A still image.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "image"))]
    Photo,
    /// A video clip; the thumbnail is an extracted frame.
    Video,
}

/// A geotagged media record as produced by the offline processing pipeline.
///
/// The sampler treats photos as read-only input. With the `serde` feature the
/// type (de)serializes from the entries of a `manifest.json` file; the
/// transient [`Photo::is_favorite`] flag is never serialized.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Photo {
    /// Location of the full-size media. Part of the identity key.
    pub url: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Location of the thumbnail image.
    #[cfg_attr(feature = "serde", serde(default))]
    pub thumbnail: String,
    /// Whether this is a still image or a video.
    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    pub kind: MediaKind,
    /// Optional caption. An empty caption counts as no caption.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub caption: Option<String>,
    /// Capture date as written by the pipeline (`YYYY-MM-DD`).
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub date: Option<String>,
    /// Free-form tags.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
    /// Link to the item in Google Photos, if known.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub google_photos_url: Option<String>,
    /// Public web link derived from `google_photos_url`.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub web_url: Option<String>,
    /// Set by the host from its favorites store; not part of the manifest.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub is_favorite: bool,
}

impl Photo {
    /// Creates a photo with the given url and position and empty metadata.
    #[must_use]
    pub fn new(url: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            url: url.into(),
            lat,
            lng,
            ..Self::default()
        }
    }

    /// Sets the caption.
    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Sets the thumbnail location.
    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = thumbnail.into();
        self
    }

    /// Sets the media kind.
    #[must_use]
    pub fn with_kind(mut self, kind: MediaKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the transient favorite flag.
    #[must_use]
    pub fn with_favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = is_favorite;
        self
    }

    /// Returns the geographic position.
    #[must_use]
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    /// Returns `true` if the photo carries a non-empty caption.
    #[must_use]
    pub fn has_caption(&self) -> bool {
        self.caption.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// Returns the identity key `url|lat|lng`.
    ///
    /// Coordinates use the shortest decimal form that round-trips (`10`,
    /// `10.0001`), so the same record yields the same key on every pass.
    #[must_use]
    pub fn identity_key(&self) -> String {
        let mut key = String::with_capacity(self.url.len() + 24);
        key.push_str(&self.url);
        // Writing into a `String` cannot fail.
        let _ = write!(
            key,
            "|{}|{}",
            normalize_zero(self.lat),
            normalize_zero(self.lng)
        );
        key
    }
}

fn normalize_zero(v: f64) -> f64 {
    if v == 0.0 { 0.0 } else { v }
}

#[cfg(test)]
mod tests {
    use super::{MediaKind, Photo};

    #[test]
    fn identity_key_uses_shortest_coordinates() {
        let p = Photo::new("photos/a.jpg", 10.0, 10.0001);
        assert_eq!(p.identity_key(), "photos/a.jpg|10|10.0001");

        let q = Photo::new("b.jpg", -33.8688, 151.2093);
        assert_eq!(q.identity_key(), "b.jpg|-33.8688|151.2093");
    }

    #[test]
    fn identity_key_folds_negative_zero() {
        let p = Photo::new("z.jpg", -0.0, 0.0);
        assert_eq!(p.identity_key(), "z.jpg|0|0");
    }

    #[test]
    fn identity_key_is_stable_across_clones() {
        let p = Photo::new("c.jpg", 1.5, 2.25).with_caption("Lisbon");
        assert_eq!(p.identity_key(), p.clone().identity_key());
    }

    #[test]
    fn empty_caption_is_not_a_caption() {
        assert!(!Photo::new("a", 0.0, 0.0).has_caption());
        assert!(!Photo::new("a", 0.0, 0.0).with_caption("").has_caption());
        assert!(Photo::new("a", 0.0, 0.0).with_caption(" ").has_caption());
    }

    #[test]
    fn builders_set_fields() {
        let p = Photo::new("v.mp4", 1.0, 2.0)
            .with_kind(MediaKind::Video)
            .with_thumbnail("thumbs/v.jpg")
            .with_favorite(true);
        assert_eq!(p.kind, MediaKind::Video);
        assert_eq!(p.thumbnail, "thumbs/v.jpg");
        assert!(p.is_favorite);
        assert_eq!(p.position().lat, 1.0);
    }
}
