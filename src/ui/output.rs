//! Output verbosity mode.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show progress, results and the summary.
    #[default]
    Normal,
    /// Show the summary only.
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows per-check progress lines.
    pub fn shows_progress(&self) -> bool {
        matches!(self, Self::Normal)
    }
}
