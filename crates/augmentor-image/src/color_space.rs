use serde::{Deserialize, Serialize};

/// Tag describing how the channels of a pixel are interpreted.
///
/// The transforms never look inside the tag; it travels with the image so that
/// transient buffers are allocated with the same layout as their source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorSpace {
    /// Single luminance channel.
    #[default]
    Gray,
    /// Luminance plus alpha.
    GrayAlpha,
    /// Red, green and blue.
    Rgb,
    /// Blue, green and red.
    Bgr,
    /// Red, green, blue and alpha.
    Rgba,
    /// Blue, green, red and alpha.
    Bgra,
}

impl ColorSpace {
    /// Number of channels a pixel in this color space carries.
    pub fn num_channels(&self) -> usize {
        match self {
            ColorSpace::Gray => 1,
            ColorSpace::GrayAlpha => 2,
            ColorSpace::Rgb | ColorSpace::Bgr => 3,
            ColorSpace::Rgba | ColorSpace::Bgra => 4,
        }
    }
}

impl std::fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            ColorSpace::Gray => "Gray",
            ColorSpace::GrayAlpha => "GrayAlpha",
            ColorSpace::Rgb => "Rgb",
            ColorSpace::Bgr => "Bgr",
            ColorSpace::Rgba => "Rgba",
            ColorSpace::Bgra => "Bgra",
        };
        write!(f, "{name}")
    }
}
