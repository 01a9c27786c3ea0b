#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new_rgb(0, 0, 0);
    pub const WHITE: Color = Color::new_rgb(255, 255, 255);

    /// DMG shades as produced by the background/sprite palettes.
    pub const LIGHT_GRAY: Color = Color::new_rgb(0xCC, 0xCC, 0xCC);
    pub const DARK_GRAY: Color = Color::new_rgb(0x77, 0x77, 0x77);

    #[inline]
    pub const fn new_rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }

    #[inline]
    pub const fn gray(level: u8) -> Color {
        Color::new_rgb(level, level, level)
    }

    #[inline]
    pub const fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    #[inline]
    pub const fn to_array(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    pub const fn from_array(rgb: [u8; 3]) -> Color {
        Color::new_rgb(rgb[0], rgb[1], rgb[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_conversion_keeps_channel_order() {
        let color = Color::new_rgb(1, 2, 3);
        assert_eq!(color.to_array(), [1, 2, 3]);
        assert_eq!(Color::from_array([1, 2, 3]), color);
        assert_eq!(Color::gray(0x77), Color::DARK_GRAY);
    }
}
