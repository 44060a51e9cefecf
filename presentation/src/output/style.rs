//! Color handling that can be switched off per renderer

use colored::{Color, Colorize};

#[derive(Debug, Clone, Copy)]
pub(crate) struct Style {
    enabled: bool,
}

impl Style {
    pub(crate) fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn color_of(name: &str) -> Color {
        name.parse().unwrap_or(Color::White)
    }

    pub(crate) fn bold(&self, text: &str) -> String {
        if self.enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub(crate) fn dimmed(&self, text: &str) -> String {
        if self.enabled {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    pub(crate) fn paint(&self, text: &str, color: &str) -> String {
        if self.enabled {
            text.color(Self::color_of(color)).to_string()
        } else {
            text.to_string()
        }
    }

    pub(crate) fn paint_bold(&self, text: &str, color: &str) -> String {
        if self.enabled {
            text.color(Self::color_of(color)).bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub(crate) fn paint_dimmed(&self, text: &str, color: &str) -> String {
        if self.enabled {
            text.color(Self::color_of(color)).dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}
