//! 24-bit RGB palette for the terminal recovery surface.

use owo_colors::{OwoColorize, Rgb};

use crate::error::Severity;

/// Palette used by the surface renderer.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Critical failures - red (239, 68, 68)
    pub critical: Rgb,
    /// Error severity - orange (249, 115, 22)
    pub error: Rgb,
    /// Warning severity - yellow (234, 179, 8)
    pub warning: Rgb,
    /// Informational - blue (59, 130, 246)
    pub info: Rgb,
    /// Healthy / recovered - green (34, 197, 94)
    pub success: Rgb,
    /// Primary action and headings - cyan (34, 211, 238)
    pub primary: Rgb,
    /// Secondary text - gray (107, 114, 128)
    pub muted: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            critical: Rgb(239, 68, 68),
            error: Rgb(249, 115, 22),
            warning: Rgb(234, 179, 8),
            info: Rgb(59, 130, 246),
            success: Rgb(34, 197, 94),
            primary: Rgb(34, 211, 238),
            muted: Rgb(107, 114, 128),
        }
    }
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indicator color for a severity.
    pub fn for_severity(&self, severity: Severity) -> Rgb {
        match severity {
            Severity::Info => self.info,
            Severity::Warning => self.warning,
            Severity::Error => self.error,
            Severity::Critical => self.critical,
        }
    }
}

/// Colors `text` when `enabled`, otherwise returns it unchanged.
pub fn paint(text: &str, color: Rgb, enabled: bool) -> String {
    if enabled {
        text.color(color).to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_colors() {
        let theme = Theme::new();
        assert_eq!(theme.for_severity(Severity::Critical), Rgb(239, 68, 68));
        assert_eq!(theme.for_severity(Severity::Warning), Rgb(234, 179, 8));
    }

    #[test]
    fn test_paint_disabled_is_plain() {
        assert_eq!(paint("Retry", Rgb(1, 2, 3), false), "Retry");
    }

    #[test]
    fn test_paint_enabled_adds_escape_codes() {
        let painted = paint("Retry", Rgb(1, 2, 3), true);
        assert!(painted.contains("Retry"));
        assert!(painted.contains("\u{1b}["));
    }
}
