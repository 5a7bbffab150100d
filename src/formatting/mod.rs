//! Terminal styling: color detection and a small formatter abstraction.

pub mod numbers;

use colored::*;
use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattingConfig {
    pub color: ColorMode,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
        }
    }
}

impl FormattingConfig {
    pub fn new(color: ColorMode) -> Self {
        Self { color }
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();

        // NO_COLOR per no-color.org
        if env::var("NO_COLOR").is_ok() {
            config.color = ColorMode::Never;
        }

        if let Ok(val) = env::var("CLICOLOR") {
            if val == "0" {
                config.color = ColorMode::Never;
            }
        }

        if let Ok(val) = env::var("CLICOLOR_FORCE") {
            if val == "1" {
                config.color = ColorMode::Always;
            }
        }

        config
    }

    /// No colors at all
    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
        }
    }
}

/// Severity of a bucket, from best to worst position in its scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Neutral,
    Caution,
    Alert,
}

impl Tone {
    /// Tone of the bucket at `ordinal` in a scheme of `len` buckets,
    /// where ordinal 0 is the best bucket.
    pub fn from_rank(ordinal: usize, len: usize) -> Self {
        match (ordinal, len.saturating_sub(1)) {
            (0, _) => Tone::Good,
            (o, last) if o >= last => Tone::Alert,
            (o, last) if o + 1 == last => Tone::Caution,
            _ => Tone::Neutral,
        }
    }
}

pub trait OutputFormatter {
    fn header(&self, text: &str) -> String;
    fn caption(&self, text: &str) -> String;
    fn value(&self, text: &str) -> String;
    fn warning(&self, text: &str) -> String;
    fn error(&self, text: &str) -> String;
    fn dim(&self, text: &str) -> String;
    fn tone(&self, text: &str, tone: Tone) -> String;
}

pub struct ColoredFormatter {
    enabled: bool,
}

impl ColoredFormatter {
    pub fn new(config: FormattingConfig) -> Self {
        let enabled = config.color.should_use_color();
        colored::control::set_override(enabled);
        Self { enabled }
    }

    fn paint(&self, text: &str, style: impl FnOnce(&str) -> ColoredString) -> String {
        if self.enabled {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for ColoredFormatter {
    fn header(&self, text: &str) -> String {
        self.paint(text, |t| t.blue().bold())
    }

    fn caption(&self, text: &str) -> String {
        self.paint(text, |t| t.cyan())
    }

    fn value(&self, text: &str) -> String {
        self.paint(text, |t| t.bold())
    }

    fn warning(&self, text: &str) -> String {
        self.paint(text, |t| t.yellow())
    }

    fn error(&self, text: &str) -> String {
        self.paint(text, |t| t.red())
    }

    fn dim(&self, text: &str) -> String {
        self.paint(text, |t| t.dimmed())
    }

    fn tone(&self, text: &str, tone: Tone) -> String {
        match tone {
            Tone::Good => self.paint(text, |t| t.green()),
            Tone::Neutral => self.paint(text, |t| t.normal()),
            Tone::Caution => self.paint(text, |t| t.yellow()),
            Tone::Alert => self.paint(text, |t| t.red().bold()),
        }
    }
}

pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn header(&self, text: &str) -> String {
        text.to_string()
    }

    fn caption(&self, text: &str) -> String {
        text.to_string()
    }

    fn value(&self, text: &str) -> String {
        text.to_string()
    }

    fn warning(&self, text: &str) -> String {
        text.to_string()
    }

    fn error(&self, text: &str) -> String {
        text.to_string()
    }

    fn dim(&self, text: &str) -> String {
        text.to_string()
    }

    fn tone(&self, text: &str, _tone: Tone) -> String {
        text.to_string()
    }
}

/// Pick the formatter for a configuration.
pub fn formatter_for(config: FormattingConfig) -> Box<dyn OutputFormatter> {
    if config.color.should_use_color() {
        Box::new(ColoredFormatter::new(config))
    } else {
        colored::control::set_override(false);
        Box::new(PlainFormatter)
    }
}

fn detect_color_support() -> bool {
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }
    std::io::stdout().is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_from_rank() {
        assert_eq!(Tone::from_rank(0, 4), Tone::Good);
        assert_eq!(Tone::from_rank(1, 4), Tone::Neutral);
        assert_eq!(Tone::from_rank(2, 4), Tone::Caution);
        assert_eq!(Tone::from_rank(3, 4), Tone::Alert);
    }

    #[test]
    fn test_plain_formatter_is_identity() {
        let f = formatter_for(FormattingConfig::plain());
        assert_eq!(f.header("TOP 5"), "TOP 5");
        assert_eq!(f.tone(">180 días", Tone::Alert), ">180 días");
    }
}
