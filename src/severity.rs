const NORMAL_MAX: f64 = 50.0;
const WARNING_MAX: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl Severity {
    /// Upper bounds are inclusive: 50.0 is normal, 80.0 is warning.
    pub fn classify(percent: f64) -> Self {
        if percent <= NORMAL_MAX {
            Severity::Normal
        } else if percent <= WARNING_MAX {
            Severity::Warning
        } else {
            Severity::Critical
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }

    /// CSS colour name used by dashboard templates.
    pub fn color(self) -> &'static str {
        match self {
            Severity::Normal => "green",
            Severity::Warning => "orange",
            Severity::Critical => "red",
        }
    }
}
