//! Presentation-level configuration
//!
//! Settings for terminal rendering, resolved by the binary from the config
//! file, the debate file and command-line flags.

/// Wrap width used when neither the debate file nor the config sets one
pub const DEFAULT_LINE_WIDTH: usize = 80;

/// Narrowest wrap width the renderer accepts
pub const MIN_LINE_WIDTH: usize = 20;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// Wrap width for statements and thoughts
    pub line_width: usize,
    /// Print PLAN and THINK events
    pub show_thoughts: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            line_width: DEFAULT_LINE_WIDTH,
            show_thoughts: true,
        }
    }
}

impl OutputConfig {
    pub fn with_line_width(mut self, width: usize) -> Self {
        self.line_width = width.max(MIN_LINE_WIDTH);
        self
    }
}
