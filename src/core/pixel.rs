use serde::{Deserialize, Serialize};

/// 16-entry console palette. Discriminants are the native attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    #[default]
    Black = 0,
    DarkBlue = 1,
    DarkGreen = 2,
    DarkCyan = 3,
    DarkRed = 4,
    DarkMagenta = 5,
    DarkYellow = 6,
    Gray = 7,
    DarkGray = 8,
    Blue = 9,
    Green = 10,
    Cyan = 11,
    Red = 12,
    Magenta = 13,
    Yellow = 14,
    White = 15,
}

impl Color {
    pub const ALL: [Color; 16] = [
        Color::Black,
        Color::DarkBlue,
        Color::DarkGreen,
        Color::DarkCyan,
        Color::DarkRed,
        Color::DarkMagenta,
        Color::DarkYellow,
        Color::Gray,
        Color::DarkGray,
        Color::Blue,
        Color::Green,
        Color::Cyan,
        Color::Red,
        Color::Magenta,
        Color::Yellow,
        Color::White,
    ];

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Color> {
        Self::ALL.get(index as usize).copied()
    }
}

/// One character cell: a glyph plus foreground and background palette colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pixel {
    pub character: char,
    pub foreground: Color,
    pub background: Color,
}

impl Default for Pixel {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Pixel {
    pub const EMPTY: Pixel = Pixel::new(' ', Color::Black, Color::Black);
    pub const FULL: Pixel = Pixel::new(' ', Color::White, Color::White);

    pub const fn new(character: char, foreground: Color, background: Color) -> Self {
        Self {
            character,
            foreground,
            background,
        }
    }

    /// Field-wise comparison of character and both colors.
    pub fn same_as(&self, other: &Pixel) -> bool {
        self.character == other.character
            && self.foreground == other.foreground
            && self.background == other.background
    }

    /// Packed native attribute: foreground in the low nibble, background in the high nibble.
    pub const fn attributes(&self) -> u16 {
        (self.foreground.index() as u16) | ((self.background.index() as u16) << 4)
    }

    pub fn with_character(mut self, character: char) -> Self {
        self.character = character;
        self
    }

    pub fn with_colors(mut self, foreground: Color, background: Color) -> Self {
        self.foreground = foreground;
        self.background = background;
        self
    }
}
