use std::sync::Arc;

use crate::application::services::QueryPipeline;
use crate::presentation::config::{ScaffoldConfig, Settings};

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<QueryPipeline>,
    pub settings: Arc<Settings>,
    pub scaffold_config: ScaffoldConfig,
}

impl AppState {
    pub fn new(pipeline: Arc<QueryPipeline>, settings: Settings, scaffold_config: ScaffoldConfig) -> Self {
        Self {
            pipeline,
            settings: Arc::new(settings),
            scaffold_config,
        }
    }
}
