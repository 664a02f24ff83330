/*
 * Palette Module
 *
 * This module defines the display-mode flag and the accent colors used to
 * paint particles and links. Only the alpha channel varies per particle or
 * per link; the hue comes from the current display mode.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

// Dark/light toggle controlling which accent the field is painted with
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Dark,
    Light,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Dark => DisplayMode::Light,
            DisplayMode::Light => DisplayMode::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == DisplayMode::Dark
    }
}

/// An 8-bit RGB color with a floating point opacity, the shape of a CSS
/// `rgba(r,g,b,a)` fill style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    // Normalized components, for renderers working in 0..1 floats
    pub fn to_f32(self) -> (f32, f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a,
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

// Accent hues for both display modes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub dark: [u8; 3],
    pub light: [u8; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            dark: [0, 212, 255],
            light: [0, 100, 200],
        }
    }
}

impl Palette {
    pub fn accent(&self, mode: DisplayMode, alpha: f32) -> Color {
        let [r, g, b] = match mode {
            DisplayMode::Dark => self.dark,
            DisplayMode::Light => self.light,
        };
        Color::rgba(r, g, b, alpha)
    }
}
