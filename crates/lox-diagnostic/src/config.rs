//! Rendering configuration for diagnostics.

/// Controls how [`emit`](crate::emit) renders a report.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Colorize the output.
    pub color: bool,
    /// Include `note:` lines.
    pub show_notes: bool,
    /// Include the `help:` line.
    pub show_help: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_notes: true,
            show_help: true,
        }
    }
}

impl ReportConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable colors.
    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Enable or disable notes and help together.
    pub fn hints(mut self, enabled: bool) -> Self {
        self.show_notes = enabled;
        self.show_help = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert!(config.color);
        assert!(config.show_notes);
        assert!(config.show_help);
    }

    #[test]
    fn test_builder() {
        let config = ReportConfig::new().color(false).hints(false);
        assert!(!config.color);
        assert!(!config.show_notes);
        assert!(!config.show_help);
    }
}
