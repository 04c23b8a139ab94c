//! Method selectors shared with host UIs
//!
//! Hosts present these choices as drop-down labels. Each enum parses from
//! and prints as its label, and `ALL` lists the labels in display order.

use crate::ColorError;
use std::fmt;
use std::str::FromStr;

/// Dithering applied when remapping onto a palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DitherMethod {
    /// Nearest palette entry per pixel
    #[default]
    None,
    /// Floyd-Steinberg error diffusion
    FloydSteinberg,
}

impl DitherMethod {
    /// All methods, in display order
    pub const ALL: [DitherMethod; 2] = [DitherMethod::None, DitherMethod::FloydSteinberg];

    /// Host label
    pub fn label(self) -> &'static str {
        match self {
            DitherMethod::None => "None",
            DitherMethod::FloydSteinberg => "Floyd-Steinberg",
        }
    }
}

/// Algorithm used to derive a palette from an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuantizeMethod {
    /// Split the most populated color box first
    #[default]
    MedianCut,
    /// Split the largest color box first
    MaxCoverage,
    /// Keep the most populated octcubes
    FastOctree,
    /// Delegate to libimagequant
    LibImageQuant,
}

impl QuantizeMethod {
    /// All methods, in display order
    pub const ALL: [QuantizeMethod; 4] = [
        QuantizeMethod::MedianCut,
        QuantizeMethod::MaxCoverage,
        QuantizeMethod::FastOctree,
        QuantizeMethod::LibImageQuant,
    ];

    /// Host label
    pub fn label(self) -> &'static str {
        match self {
            QuantizeMethod::MedianCut => "Median cut",
            QuantizeMethod::MaxCoverage => "Maximum coverage",
            QuantizeMethod::FastOctree => "Fast octree",
            QuantizeMethod::LibImageQuant => "libimagequant",
        }
    }
}

impl fmt::Display for DitherMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for QuantizeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DitherMethod {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DitherMethod::ALL
            .into_iter()
            .find(|m| m.label() == s)
            .ok_or_else(|| ColorError::InvalidParameters(format!("unknown dither method: {s:?}")))
    }
}

impl FromStr for QuantizeMethod {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuantizeMethod::ALL
            .into_iter()
            .find(|m| m.label() == s)
            .ok_or_else(|| {
                ColorError::InvalidParameters(format!("unknown quantize method: {s:?}"))
            })
    }
}
