//! Collapsible raw-error detail panel.

use serde::Serialize;

use super::theme::{paint, Theme};

/// Visibility of the detail panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelState {
    /// Only the header is shown.
    #[default]
    Collapsed,
    /// Header and all lines are shown.
    Expanded,
}

impl PanelState {
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        };
    }

    pub fn is_expanded(&self) -> bool {
        matches!(self, Self::Expanded)
    }

    pub fn from_visible(visible: bool) -> Self {
        if visible {
            Self::Expanded
        } else {
            Self::Collapsed
        }
    }
}

/// Diagnostic lines for the captured failure, hidden by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailsPanel {
    state: PanelState,
    lines: Vec<String>,
}

impl DetailsPanel {
    pub fn new(lines: Vec<String>) -> Self {
        Self {
            state: PanelState::Collapsed,
            lines,
        }
    }

    pub fn with_state(mut self, state: PanelState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn toggle(&mut self) {
        self.state.toggle();
    }

    /// Lines hidden while collapsed.
    pub fn hidden_count(&self) -> usize {
        if self.state.is_expanded() {
            0
        } else {
            self.lines.len()
        }
    }

    pub fn render(&self, theme: &Theme, colors: bool) -> String {
        let mut output = String::new();
        match self.state {
            PanelState::Collapsed => {
                output.push_str(&format!(
                    "{} {}\n",
                    paint("▶", theme.muted, colors),
                    paint(
                        &format!("Error details (+{} lines)", self.lines.len()),
                        theme.muted,
                        colors
                    )
                ));
            }
            PanelState::Expanded => {
                output.push_str(&format!(
                    "{} {}\n",
                    paint("▼", theme.primary, colors),
                    paint("Error details", theme.primary, colors)
                ));
                for line in &self.lines {
                    output.push_str(&format!("  {}\n", line));
                }
            }
        }
        output
    }
}
