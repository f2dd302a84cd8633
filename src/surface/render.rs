//! Terminal rendering of the recovery surface.

use super::theme::{paint, Theme};
use super::RecoverySurface;
use crate::boundary::HealthStatus;

/// Renders a [`RecoverySurface`] as terminal text.
#[derive(Debug, Clone)]
pub struct SurfaceRenderer {
    theme: Theme,
    colors: bool,
}

impl Default for SurfaceRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceRenderer {
    /// Creates a renderer; colors follow `NO_COLOR`.
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
            colors: std::env::var_os("NO_COLOR").is_none(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.colors = enabled;
        self
    }

    pub fn render(&self, surface: &RecoverySurface) -> String {
        let theme = &self.theme;
        let colors = self.colors;
        let accent = theme.for_severity(surface.severity);
        let mut output = String::new();

        output.push_str(&format!(
            "{} {}\n",
            paint(&format!("[{}]", surface.status_indicator), accent, colors),
            paint(&surface.title, accent, colors)
        ));
        output.push_str(&format!("{}\n", surface.description));

        if let Some(name) = &surface.boundary {
            output.push_str(&paint(&format!("in {}\n", name), theme.muted, colors));
        }

        if let Some(health) = surface.health {
            let color = match health {
                HealthStatus::Healthy => theme.success,
                HealthStatus::Degraded | HealthStatus::Maintenance => theme.warning,
                HealthStatus::Unhealthy | HealthStatus::Offline => theme.critical,
            };
            output.push_str(&format!("Health: {}\n", paint(health.label(), color, colors)));
        }

        if surface.retrying {
            output.push_str(&paint("Retrying…\n", theme.info, colors));
        } else if let Some(seconds) = surface.countdown_seconds {
            let unit = if seconds == 1 { "second" } else { "seconds" };
            output.push_str(&paint(
                &format!(
                    "Retrying in {} {} (attempt {} of {})\n",
                    seconds,
                    unit,
                    surface.retry_attempt + 1,
                    surface.max_retries
                ),
                theme.info,
                colors,
            ));
        } else if surface.exhausted {
            output.push_str(&paint(
                &format!(
                    "Automatic retries exhausted ({} of {})\n",
                    surface.retry_attempt, surface.max_retries
                ),
                theme.muted,
                colors,
            ));
        }

        if !surface.actions.is_empty() {
            output.push('\n');
        }
        for action in &surface.actions {
            let button = format!("[ {} ]", action.label);
            let button = if action.disabled {
                paint(&button, theme.muted, colors)
            } else if action.is_primary {
                paint(&button, theme.primary, colors)
            } else {
                button
            };
            let marker = if action.is_primary { "▸" } else { " " };
            match &action.destination_url {
                Some(url) => output.push_str(&format!(
                    "{} {} {}\n",
                    marker,
                    button,
                    paint(&format!("→ {}", url), theme.muted, colors)
                )),
                None => output.push_str(&format!("{} {}\n", marker, button)),
            }
        }

        if let Some(details) = &surface.details {
            output.push('\n');
            output.push_str(&details.render(theme, colors));
        }

        output
    }
}
