use serde::{Deserialize, Serialize};

/// Diagnostics collected while a lesson runs.
/// When enabled, the run report carries wall-clock timings per step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticsCfg {
    pub enabled: bool,
}

impl Default for DiagnosticsCfg {
    fn default() -> Self {
        DiagnosticsCfg { enabled: true }
    }
}
