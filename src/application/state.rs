// src/application/state.rs

use std::sync::Arc;
use std::time::Duration;

use crate::config::{MuseumConfig, ThrottleMode};
use crate::events::EventBus;
use crate::repositories::RepositorySource;
use crate::services::{
    AdaptiveBackoff, ExhibitionSession, FixedDelay, RankedAggregator, ThrottlePolicy,
};

/// Application state shared by the command handlers.
/// All fields are Arc-wrapped for thread-safe sharing across commands.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub session: Arc<ExhibitionSession>,
    /// Starting offset for caption rotation
    pub caption_seed: usize,
}

impl AppState {
    /// Wires the aggregation stack on top of `source`
    pub fn from_config(
        config: &MuseumConfig,
        source: Arc<dyn RepositorySource>,
        caption_seed: usize,
    ) -> Self {
        let event_bus = Arc::new(EventBus::new());
        let throttle = throttle_policy(config);
        let aggregator = Arc::new(RankedAggregator::new(
            source,
            throttle,
            Arc::clone(&event_bus),
            config.page_size,
        ));
        let session = Arc::new(ExhibitionSession::new(
            aggregator,
            Arc::clone(&event_bus),
            config.default_threshold_months,
            config.collection_result_bound,
        ));

        Self {
            event_bus,
            session,
            caption_seed,
        }
    }
}

/// Builds the pacing policy selected by `config.throttle`
pub fn throttle_policy(config: &MuseumConfig) -> Arc<dyn ThrottlePolicy> {
    let base = Duration::from_millis(config.inter_fetch_delay_ms);
    match config.throttle {
        ThrottleMode::Fixed => Arc::new(FixedDelay::new(base)),
        ThrottleMode::Adaptive => Arc::new(AdaptiveBackoff::new(
            base,
            Duration::from_millis(config.max_backoff_ms),
        )),
    }
}
