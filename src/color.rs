// Simple color struct, created from an unsigned 32 representing RRGGBBAA

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    // Particle palette, one entry is picked per particle at spawn
    pub const PALETTE: [Color; 4] = [
        Color::from_u32(0x3b82f699),
        Color::from_u32(0x2563eb99),
        Color::from_u32(0x60a5fa80),
        Color::from_u32(0x8b5cf699),
    ];

    // Connection lines; alpha is replaced per line
    pub const LINK: Color = Color::from_u32(0x3b82f6ff);

    pub const fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    pub fn alpha(&self) -> f64 {
        self.a as f64 / 255.0
    }

    // CSS color string with the color's own alpha. A u8 alpha only has
    // about two decimals of precision, so 0x80 prints as 0.5.
    pub fn to_css(&self) -> String {
        self.css(self.alpha(), 100.0)
    }

    pub fn to_css_with_alpha(&self, alpha: f64) -> String {
        self.css(alpha, 1000.0)
    }

    fn css(&self, alpha: f64, scale: f64) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            (alpha.max(0.0).min(1.0) * scale).round() / scale
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_rrggbbaa() {
        let c = Color::from_u32(0x3b82f699);
        assert_eq!((c.r, c.g, c.b, c.a), (59, 130, 246, 0x99));
    }

    #[test]
    fn palette_renders_its_css_alphas() {
        let css: Vec<String> = Color::PALETTE.iter().map(Color::to_css).collect();
        assert_eq!(
            css,
            vec![
                "rgba(59, 130, 246, 0.6)",
                "rgba(37, 99, 235, 0.6)",
                "rgba(96, 165, 250, 0.5)",
                "rgba(139, 92, 246, 0.6)",
            ]
        );
    }

    #[test]
    fn line_alpha_keeps_three_decimals() {
        assert_eq!(Color::LINK.to_css_with_alpha(0.275), "rgba(59, 130, 246, 0.275)");
        assert_eq!(Color::LINK.to_css_with_alpha(0.25), "rgba(59, 130, 246, 0.25)");
    }

    #[test]
    fn css_alpha_is_clamped() {
        assert_eq!(Color::LINK.to_css_with_alpha(-0.2), "rgba(59, 130, 246, 0)");
        assert_eq!(Color::LINK.to_css_with_alpha(3.0), "rgba(59, 130, 246, 1)");
    }
}
