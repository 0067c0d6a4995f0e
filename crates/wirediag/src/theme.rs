use image::Rgba;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Rgba<u8>,
    pub foreground: Rgba<u8>,
    pub component_fill: Rgba<u8>,
    pub component_outline: Rgba<u8>,
    pub pad: Rgba<u8>,
    pub legend_background: Rgba<u8>,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Rgba([0x1E, 0x1E, 0x1E, 0xFF]),
            foreground: Rgba([0xC8, 0xC8, 0xC8, 0xFF]),
            component_fill: Rgba([0x2D, 0x2D, 0x2D, 0xFF]),
            component_outline: Rgba([0xD4, 0xD4, 0xD4, 0xFF]),
            pad: Rgba([0xE8, 0xA8, 0x38, 0xFF]),
            legend_background: Rgba([0x26, 0x26, 0x26, 0xFF]),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Rgba([0xFF, 0xFF, 0xFF, 0xFF]),
            foreground: Rgba([0x1A, 0x1A, 0x2E, 0xFF]),
            component_fill: Rgba([0xF5, 0xF5, 0xF5, 0xFF]),
            component_outline: Rgba([0x33, 0x33, 0x33, 0xFF]),
            pad: Rgba([0xB8, 0x7B, 0x0A, 0xFF]),
            legend_background: Rgba([0xF0, 0xF0, 0xF0, 0xFF]),
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            _ => Self::light(),
        }
    }

    /// Theme names accepted by [`Theme::from_name`] and the config file.
    pub fn names() -> &'static [&'static str] {
        &["light", "dark"]
    }

    /// Wire colours are tuned for a white canvas; on dark backgrounds the
    /// black ground wire is drawn in the foreground colour instead.
    pub fn wire_color(&self, rgb: [u8; 3]) -> Rgba<u8> {
        if rgb == [0, 0, 0] && self.name == "dark" {
            self.foreground
        } else {
            Rgba([rgb[0], rgb[1], rgb[2], 0xFF])
        }
    }
}
