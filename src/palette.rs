use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use strum::{Display, EnumIter, EnumString};

use crate::error::{Error, Result};

/** index of a color inside a [`Palette`] */
pub type ColorId = usize;

/// ANSI escape resetting the terminal color
pub const ANSI_RESET: &str = "\u{1B}[0m";

/**
Color labels accepted in a palette.
Parsing is case insensitive, display uses the upper case name.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum NamedColor {
    /// black
    Black,
    /// blue
    Blue,
    /// cyan
    Cyan,
    /// dark gray
    #[strum(to_string = "DARK_GRAY", serialize = "DARKGRAY")]
    DarkGray,
    /// gray
    Gray,
    /// green
    Green,
    /// light gray
    #[strum(to_string = "LIGHT_GRAY", serialize = "LIGHTGRAY")]
    LightGray,
    /// magenta
    Magenta,
    /// orange
    Orange,
    /// pink
    Pink,
    /// purple
    Purple,
    /// red
    Red,
    /// white
    White,
    /// yellow
    Yellow,
}

impl NamedColor {
    /// (red, green, blue) components
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            NamedColor::Black => (0, 0, 0),
            NamedColor::Blue => (0, 0, 255),
            NamedColor::Cyan => (0, 255, 255),
            NamedColor::DarkGray => (64, 64, 64),
            NamedColor::Gray => (128, 128, 128),
            NamedColor::Green => (0, 255, 0),
            NamedColor::LightGray => (192, 192, 192),
            NamedColor::Magenta => (255, 0, 255),
            NamedColor::Orange => (255, 200, 0),
            NamedColor::Pink => (255, 175, 175),
            NamedColor::Purple => (128, 0, 128),
            NamedColor::Red => (255, 0, 0),
            NamedColor::White => (255, 255, 255),
            NamedColor::Yellow => (255, 255, 0),
        }
    }

    /// html-like hexadecimal code (#rrggbb)
    pub fn hex(self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// ANSI foreground escape, if the 8-color terminal set has one for this color
    pub fn ansi(self) -> Option<&'static str> {
        match self {
            NamedColor::Black => Some("\u{1B}[30m"),
            NamedColor::Red => Some("\u{1B}[31m"),
            NamedColor::Green => Some("\u{1B}[32m"),
            NamedColor::Yellow => Some("\u{1B}[33m"),
            NamedColor::Blue => Some("\u{1B}[34m"),
            NamedColor::Purple | NamedColor::Magenta => Some("\u{1B}[35m"),
            NamedColor::Cyan => Some("\u{1B}[36m"),
            NamedColor::White => Some("\u{1B}[37m"),
            _ => None,
        }
    }
}

/**
Ordered list of distinct colors available for a run.

The order is the preference order of the greedy colorization, and the last color
is the scarce one: the search tries to use it as little as possible.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<NamedColor>,
}

impl Default for Palette {
    /// BLUE, GREEN, RED, YELLOW
    fn default() -> Self {
        Self {
            colors: vec![NamedColor::Blue, NamedColor::Green, NamedColor::Red, NamedColor::Yellow],
        }
    }
}

impl Palette {
    /** builds a palette from labels. Fails on an empty list, an unrecognized label
    or a label listed twice. */
    pub fn new<S: AsRef<str>>(labels: &[S]) -> Result<Self> {
        let mut colors: Vec<NamedColor> = Vec::with_capacity(labels.len());
        for label in labels {
            let label = label.as_ref().trim();
            let color: NamedColor = label.parse()
                .map_err(|_| Error::UnknownColor(label.to_string()))?;
            if colors.contains(&color) {
                return Err(Error::DuplicateColor(color.to_string()));
            }
            colors.push(color);
        }
        if colors.is_empty() {
            return Err(Error::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /** reads one label per line (blank lines are skipped).
    returns Ok(None) if the file does not exist */
    pub fn from_file<P: AsRef<Path>>(filename: P) -> Result<Option<Self>> {
        let path = filename.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io(path, e)),
        };
        let labels: Vec<&str> = content.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        Self::new(&labels).map(Some)
    }

    /// number of colors
    pub fn len(&self) -> usize { self.colors.len() }

    /// always false for a valid palette
    pub fn is_empty(&self) -> bool { self.colors.is_empty() }

    /// color at position id
    pub fn color(&self, id: ColorId) -> NamedColor { self.colors[id] }

    /// label of the color at position id
    pub fn label(&self, id: ColorId) -> String { self.colors[id].to_string() }

    /// id of the scarce color (last one)
    pub fn scarce(&self) -> ColorId { self.colors.len() - 1 }

    /// colors in preference order
    pub fn colors(&self) -> &[NamedColor] { &self.colors }
}
