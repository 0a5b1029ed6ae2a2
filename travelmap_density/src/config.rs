// Copyright 2025 the Travelmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use core::fmt;

use crate::error::ConfigError;
use crate::photo::Photo;
use crate::provider::MarkerId;

/// Default edge length of a grid cell, in pixels.
pub const DEFAULT_CELL_SIZE: f64 = 150.0;

/// Default marker icon size, in pixels.
pub const DEFAULT_ICON_SIZE: f64 = 40.0;

/// Callback run when the user activates a rendered marker.
pub type ClickHandler = Box<dyn FnMut(&MarkerContext<'_>)>;

/// Host-supplied favorite test.
pub type FavoritePredicate = Box<dyn Fn(&Photo) -> bool>;

/// What a click handler learns about the activated marker.
#[derive(Clone, Copy, Debug)]
pub struct MarkerContext<'a> {
    /// Handle identity of the marker.
    pub id: MarkerId,
    /// Identity key of the photo it shows.
    pub key: &'a str,
    /// The photo it shows.
    pub photo: &'a Photo,
    /// Number of photos hidden behind it.
    pub hidden_count: usize,
}

/// Options for a [`DensitySampler`](crate::DensitySampler).
///
/// ```rust
/// use travelmap_density::SamplerConfig;
///
/// let config = SamplerConfig::new()
///     .with_cell_size(120.0)
///     .with_icon_size(48.0)
///     .with_favorite_predicate(|photo| photo.url.ends_with("_fav.jpg"));
/// assert!(config.validate().is_ok());
/// assert_eq!(config.cell_size(), 120.0);
/// ```
pub struct SamplerConfig {
    icon_size: f64,
    cell_size: f64,
    on_click: Option<ClickHandler>,
    is_favorite: Option<FavoritePredicate>,
}

impl SamplerConfig {
    /// Creates a configuration with default sizes and no callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            icon_size: DEFAULT_ICON_SIZE,
            cell_size: DEFAULT_CELL_SIZE,
            on_click: None,
            is_favorite: None,
        }
    }

    /// Sets the marker icon size in pixels.
    #[must_use]
    pub fn with_icon_size(mut self, icon_size: f64) -> Self {
        self.icon_size = icon_size;
        self
    }

    /// Sets the grid cell edge length in pixels.
    ///
    /// Smaller cells show more markers; larger cells show fewer.
    #[must_use]
    pub fn with_cell_size(mut self, cell_size: f64) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Sets the click callback.
    #[must_use]
    pub fn with_click_handler(mut self, handler: impl FnMut(&MarkerContext<'_>) + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    /// Sets the favorite predicate.
    ///
    /// Without one, a photo is a favorite when its
    /// [`is_favorite`](Photo::is_favorite) flag is set. The predicate runs
    /// once per candidate photo per update and should be cheap.
    #[must_use]
    pub fn with_favorite_predicate(mut self, predicate: impl Fn(&Photo) -> bool + 'static) -> Self {
        self.is_favorite = Some(Box::new(predicate));
        self
    }

    /// Returns the icon size in pixels.
    #[must_use]
    pub fn icon_size(&self) -> f64 {
        self.icon_size
    }

    /// Returns the cell size in pixels.
    #[must_use]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Checks that both sizes are finite and strictly positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_cell_size(self.cell_size)?;
        check_icon_size(self.icon_size)
    }

    /// Returns `true` if `photo` counts as a favorite.
    #[must_use]
    pub fn is_favorite(&self, photo: &Photo) -> bool {
        match &self.is_favorite {
            Some(predicate) => predicate(photo),
            None => photo.is_favorite,
        }
    }

    pub(crate) fn set_icon_size(&mut self, icon_size: f64) {
        self.icon_size = icon_size;
    }

    pub(crate) fn set_cell_size(&mut self, cell_size: f64) {
        self.cell_size = cell_size;
    }

    pub(crate) fn click(&mut self, context: &MarkerContext<'_>) -> bool {
        match &mut self.on_click {
            Some(handler) => {
                handler(context);
                true
            }
            None => false,
        }
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SamplerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SamplerConfig")
            .field("icon_size", &self.icon_size)
            .field("cell_size", &self.cell_size)
            .field("has_click_handler", &self.on_click.is_some())
            .field("has_favorite_predicate", &self.is_favorite.is_some())
            .finish()
    }
}

pub(crate) fn check_cell_size(cell_size: f64) -> Result<(), ConfigError> {
    if cell_size.is_finite() && cell_size > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidCellSize(cell_size))
    }
}

pub(crate) fn check_icon_size(icon_size: f64) -> Result<(), ConfigError> {
    if icon_size.is_finite() && icon_size > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidIconSize(icon_size))
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_CELL_SIZE, DEFAULT_ICON_SIZE, SamplerConfig};
    use crate::error::ConfigError;
    use crate::photo::Photo;

    #[test]
    fn defaults() {
        let config = SamplerConfig::default();
        assert_eq!(config.cell_size(), DEFAULT_CELL_SIZE);
        assert_eq!(config.icon_size(), DEFAULT_ICON_SIZE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_sizes() {
        assert_eq!(
            SamplerConfig::new().with_cell_size(0.0).validate(),
            Err(ConfigError::InvalidCellSize(0.0))
        );
        assert_eq!(
            SamplerConfig::new().with_icon_size(-1.0).validate(),
            Err(ConfigError::InvalidIconSize(-1.0))
        );
        assert!(
            SamplerConfig::new()
                .with_cell_size(f64::INFINITY)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn favorite_falls_back_to_flag() {
        let plain = SamplerConfig::new();
        assert!(plain.is_favorite(&Photo::new("a", 0.0, 0.0).with_favorite(true)));
        assert!(!plain.is_favorite(&Photo::new("a", 0.0, 0.0)));

        let custom = SamplerConfig::new().with_favorite_predicate(|p| p.url == "star");
        assert!(custom.is_favorite(&Photo::new("star", 0.0, 0.0)));
        assert!(!custom.is_favorite(&Photo::new("a", 0.0, 0.0).with_favorite(true)));
    }
}
