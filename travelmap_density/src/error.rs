// Copyright 2025 the Travelmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::fmt;

/// A marker renderer failed to produce a marker.
///
/// The sampler logs the failure, skips the affected bucket for the current
/// pass and tries again on the next one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderError {
    message: String,
}

impl RenderError {
    /// Creates an error carrying a human-readable reason.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the reason given by the renderer.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "marker rendering failed: {}", self.message)
    }
}

impl core::error::Error for RenderError {}

/// A sampler configuration value was rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// Grid cells must be a finite, strictly positive number of pixels.
    InvalidCellSize(f64),
    /// Icons must be a finite, strictly positive number of pixels.
    InvalidIconSize(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCellSize(v) => {
                write!(f, "cell size must be a positive number of pixels, got {v}")
            }
            Self::InvalidIconSize(v) => {
                write!(f, "icon size must be a positive number of pixels, got {v}")
            }
        }
    }
}

impl core::error::Error for ConfigError {}
