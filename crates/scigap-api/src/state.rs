//! Application state management

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use scigap_analysis::DocumentAnalyzer;
use scigap_core::AppConfig;
use scigap_extractor::{EntityExtractor, RuleBasedNer};
use scigap_remote::GapModel;

/// Application state shared across handlers.
///
/// The entity extractor is constructed once here, at process startup,
/// and passed by reference into every pipeline invocation; no handler
/// mutates it.
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Server start time
    pub start_time: Instant,
    /// Request counter
    pub request_count: AtomicU64,
    /// Shared entity extractor
    pub extractor: Arc<dyn EntityExtractor>,
    /// Document analysis pipeline
    pub analyzer: DocumentAnalyzer,
    /// Research-gap model, when configured
    pub gap_model: Option<Arc<dyn GapModel>>,
}

impl AppState {
    /// Create new application state with config and the default
    /// rule-based extractor
    pub fn new(config: AppConfig) -> Self {
        let extractor: Arc<dyn EntityExtractor> = Arc::new(RuleBasedNer::new());
        Self::with_extractor(config, extractor)
    }

    /// Create state with a custom extractor implementation
    pub fn with_extractor(config: AppConfig, extractor: Arc<dyn EntityExtractor>) -> Self {
        let analyzer = DocumentAnalyzer::new(extractor.clone(), config.analysis.clone());
        Self {
            config,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
            extractor,
            analyzer,
            gap_model: None,
        }
    }

    /// Attach a research-gap model
    pub fn with_gap_model(mut self, gap_model: Arc<dyn GapModel>) -> Self {
        self.gap_model = Some(gap_model);
        self
    }

    /// Increment request counter
    pub fn increment_requests(&self) -> u64 {
        self.request_count.fetch_add(1, Ordering::SeqCst)
    }

    /// Get total request count
    pub fn get_request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Whether research-gap generation is available
    pub fn has_gap_model(&self) -> bool {
        self.gap_model.is_some()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
