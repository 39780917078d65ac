use glossa_core::Config;
use glossa_export::ArtifactStore;
use glossa_llm::TermExtractor;

pub struct AppState {
    pub config: Config,
    pub extractor: TermExtractor,
    pub artifacts: ArtifactStore,
}
