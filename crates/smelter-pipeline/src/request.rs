use std::path::PathBuf;

use smelter_config::{Config, StageBudgets, Toolchain};

/// Everything one pipeline run needs, immutable once constructed.
///
/// The pipeline is stateless between calls; all inputs arrive here rather
/// than through ambient state.
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// Source text to translate
    pub source_text: String,
    /// Path to the external translator executable
    pub translator_path: PathBuf,
    /// Per-stage time budgets
    pub budgets: StageBudgets,
    /// Assembler/linker toolchain
    pub toolchain: Toolchain,
}

impl RunRequest {
    /// Create a request with default budgets and toolchain.
    #[must_use]
    pub fn new(source_text: impl Into<String>, translator_path: impl Into<PathBuf>) -> Self {
        Self {
            source_text: source_text.into(),
            translator_path: translator_path.into(),
            budgets: StageBudgets::default(),
            toolchain: Toolchain::default(),
        }
    }

    /// Create a request taking budgets and toolchain from a [`Config`].
    ///
    /// The translator must still be supplied explicitly; a config without
    /// one cannot produce a runnable request.
    #[must_use]
    pub fn from_config(
        source_text: impl Into<String>,
        translator_path: impl Into<PathBuf>,
        config: &Config,
    ) -> Self {
        Self {
            source_text: source_text.into(),
            translator_path: translator_path.into(),
            budgets: config.budgets.clone(),
            toolchain: config.toolchain.clone(),
        }
    }

    /// Override the stage budgets.
    #[must_use]
    pub fn budgets(mut self, budgets: StageBudgets) -> Self {
        self.budgets = budgets;
        self
    }

    /// Override the toolchain.
    #[must_use]
    pub fn toolchain(mut self, toolchain: Toolchain) -> Self {
        self.toolchain = toolchain;
        self
    }
}
