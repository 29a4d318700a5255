//! Custom node colors
//!
//! This module provides the [`NodeColor`] type which wraps the `OpaqueColor`
//! type from the color crate. Node editors store custom colors as three
//! floating point sRGB channels; diagrams need them as `#rrggbb` strings.

use std::fmt;

use color::{OpaqueColor, Srgb};
use serde::{Deserialize, Serialize};

/// Custom color assigned to a node in the editor.
///
/// Deserializes from a `[r, g, b]` array of floats in the `0.0..=1.0` range.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct NodeColor {
    color: OpaqueColor<Srgb>,
}

impl NodeColor {
    /// Create a new `NodeColor` from its red, green and blue channels.
    pub fn new(red: f32, green: f32, blue: f32) -> Self {
        Self {
            color: OpaqueColor::new([red, green, blue]),
        }
    }

    /// Returns the raw `[r, g, b]` channels.
    pub fn channels(&self) -> [f32; 3] {
        self.color.components
    }

    /// Returns the color as 8-bit channels.
    ///
    /// Each channel is scaled by 255 and truncated, so `0.999` becomes `254`
    /// rather than `255`. Channels outside the unit range are clamped.
    pub fn to_rgb8(self) -> [u8; 3] {
        self.color
            .components
            .map(|channel| (channel.clamp(0.0, 1.0) * 255.0) as u8)
    }

    /// Returns the color as a lowercase `#rrggbb` string.
    ///
    /// # Examples
    ///
    /// ```
    /// use nodemaid_core::color::NodeColor;
    ///
    /// let color = NodeColor::new(1.0, 0.5, 0.0);
    /// assert_eq!(color.to_hex(), "#ff7f00");
    /// ```
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl From<[f32; 3]> for NodeColor {
    fn from([red, green, blue]: [f32; 3]) -> Self {
        Self::new(red, green, blue)
    }
}

impl From<NodeColor> for [f32; 3] {
    fn from(color: NodeColor) -> Self {
        color.channels()
    }
}

impl fmt::Display for NodeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
