//! Styling: colors, modifiers, and the span-kind theme.

use crate::markdown::SpanKind;
use bitflags::bitflags;

/// True-color RGB representation.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        let [_, r, g, b] = hex.to_be_bytes();
        Self::new(r, g, b)
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<u32> for Rgb {
    #[inline]
    fn from(hex: u32) -> Self {
        Self::from_u32(hex)
    }
}

bitflags! {
    /// Text style modifiers.
    ///
    /// # Example
    /// ```
    /// use typewriter::render::Modifiers;
    /// let style = Modifiers::BOLD | Modifiers::ITALIC;
    /// assert!(style.contains(Modifiers::ITALIC));
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Italic text
        const ITALIC = 0b0000_0100;
        /// Underlined text
        const UNDERLINE = 0b0000_1000;
    }
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

impl Modifiers {
    /// SGR parameter for each modifier, in emission order.
    pub(crate) const SGR: [(Self, u8); 4] = [
        (Self::BOLD, 1),
        (Self::DIM, 2),
        (Self::ITALIC, 3),
        (Self::UNDERLINE, 4),
    ];
}

/// How one span is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpanStyle {
    /// Foreground color; `None` keeps the terminal default.
    pub fg: Option<Rgb>,
    /// Modifiers.
    pub modifiers: Modifiers,
}

impl SpanStyle {
    /// No color, no modifiers.
    pub const PLAIN: Self = Self {
        fg: None,
        modifiers: Modifiers::empty(),
    };

    /// A style with only modifiers.
    pub const fn modifiers(modifiers: Modifiers) -> Self {
        Self { fg: None, modifiers }
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn fg(mut self, color: Rgb) -> Self {
        self.fg = Some(color);
        self
    }

    /// Whether drawing this style emits no escape sequences.
    pub fn is_plain(&self) -> bool {
        self.fg.is_none() && self.modifiers.is_empty()
    }
}

/// Maps span kinds to styles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Plain text.
    pub text: SpanStyle,
    /// `**strong**`
    pub bold: SpanStyle,
    /// `*emphasis*`
    pub italic: SpanStyle,
    /// `` `inline code` ``
    pub code: SpanStyle,
    /// `[label](href)`
    pub link: SpanStyle,
    /// Print ` (href)` after each link label.
    pub show_link_targets: bool,
    /// Wrap links in OSC 8 hyperlink sequences.
    pub hyperlinks: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: SpanStyle::PLAIN,
            bold: SpanStyle::modifiers(Modifiers::BOLD),
            italic: SpanStyle::modifiers(Modifiers::ITALIC),
            code: SpanStyle::PLAIN.fg(Rgb::from_u32(0xE0_6C_75)),
            link: SpanStyle::modifiers(Modifiers::UNDERLINE).fg(Rgb::from_u32(0x61_AF_EF)),
            show_link_targets: true,
            hyperlinks: false,
        }
    }
}

impl Theme {
    /// A theme that emits no escape sequences at all.
    pub const fn plain() -> Self {
        Self {
            text: SpanStyle::PLAIN,
            bold: SpanStyle::PLAIN,
            italic: SpanStyle::PLAIN,
            code: SpanStyle::PLAIN,
            link: SpanStyle::PLAIN,
            show_link_targets: true,
            hyperlinks: false,
        }
    }

    /// The style for `kind`.
    pub const fn style_for(&self, kind: &SpanKind<'_>) -> SpanStyle {
        match kind {
            SpanKind::Text => self.text,
            SpanKind::Bold => self.bold,
            SpanKind::Italic => self.italic,
            SpanKind::Code => self.code,
            SpanKind::Link { .. } => self.link,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_from_hex() {
        let c = Rgb::from_u32(0xFF5500);
        assert_eq!((c.r, c.g, c.b), (0xFF, 0x55, 0x00));
        assert_eq!(format!("{c:?}"), "#ff5500");
        assert_eq!(Rgb::from(0x0000FF), Rgb::new(0, 0, 255));
    }

    #[test]
    fn test_default_theme_maps_kinds() {
        let theme = Theme::default();
        assert!(theme.style_for(&SpanKind::Text).is_plain());
        assert_eq!(theme.style_for(&SpanKind::Bold).modifiers, Modifiers::BOLD);
        assert_eq!(
            theme.style_for(&SpanKind::Italic).modifiers,
            Modifiers::ITALIC
        );
        assert!(theme.style_for(&SpanKind::Code).fg.is_some());

        let link = theme.style_for(&SpanKind::Link { href: "u" });
        assert!(link.modifiers.contains(Modifiers::UNDERLINE));
    }

    #[test]
    fn test_plain_theme() {
        let theme = Theme::plain();
        assert!(theme.style_for(&SpanKind::Bold).is_plain());
        assert!(theme.style_for(&SpanKind::Link { href: "u" }).is_plain());
    }
}
