//! The bundle of read-only source tables a build runs against.

use std::sync::Arc;

use hanzi_core::{
    BilingualSource, BilingualTable, ComponentsSource, ComponentsTable, DecompositionSource,
    DecompositionTable, GlossarySource, GlossaryTable, LeveledSource, LeveledTable,
    MnemonicSource, MnemonicTable,
};

/// Shared handles to every source. Cloning is cheap; the tables themselves
/// are never copied or mutated.
#[derive(Clone)]
pub struct Sources {
    pub primary_decomposition: Arc<dyn DecompositionSource>,
    pub fallback_decomposition: Arc<dyn DecompositionSource>,
    pub glossary: Arc<dyn GlossarySource>,
    pub bilingual: Arc<dyn BilingualSource>,
    pub leveled: Arc<dyn LeveledSource>,
    pub components: Arc<dyn ComponentsSource>,
    pub mnemonics: Arc<dyn MnemonicSource>,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            primary_decomposition: Arc::new(DecompositionTable::default()),
            fallback_decomposition: Arc::new(DecompositionTable::default()),
            glossary: Arc::new(GlossaryTable::default()),
            bilingual: Arc::new(BilingualTable::default()),
            leveled: Arc::new(LeveledTable::default()),
            components: Arc::new(ComponentsTable::default()),
            mnemonics: Arc::new(MnemonicTable::default()),
        }
    }
}

impl Sources {
    /// Empty tables everywhere; fill in with the `with_*` methods.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_primary_decomposition(mut self, source: impl DecompositionSource + 'static) -> Self {
        self.primary_decomposition = Arc::new(source);
        self
    }

    #[must_use]
    pub fn with_fallback_decomposition(
        mut self,
        source: impl DecompositionSource + 'static,
    ) -> Self {
        self.fallback_decomposition = Arc::new(source);
        self
    }

    #[must_use]
    pub fn with_glossary(mut self, source: impl GlossarySource + 'static) -> Self {
        self.glossary = Arc::new(source);
        self
    }

    #[must_use]
    pub fn with_bilingual(mut self, source: impl BilingualSource + 'static) -> Self {
        self.bilingual = Arc::new(source);
        self
    }

    #[must_use]
    pub fn with_leveled(mut self, source: impl LeveledSource + 'static) -> Self {
        self.leveled = Arc::new(source);
        self
    }

    #[must_use]
    pub fn with_components(mut self, source: impl ComponentsSource + 'static) -> Self {
        self.components = Arc::new(source);
        self
    }

    #[must_use]
    pub fn with_mnemonics(mut self, source: impl MnemonicSource + 'static) -> Self {
        self.mnemonics = Arc::new(source);
        self
    }
}

impl std::fmt::Debug for Sources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sources").finish_non_exhaustive()
    }
}
