/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AgentState)
 *   - config: 起動時に一度だけ読み込んだ AgentConfig
 *   - adapter: callback の parse を担う ResponseAdapter
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::config::AgentConfig;
use crate::services::oauth2::{QueryResponseAdapter, ResponseAdapter};

#[derive(Clone)]
pub struct AgentState {
    pub config: Arc<AgentConfig>,
    pub adapter: Arc<dyn ResponseAdapter>,
}

impl AgentState {
    pub fn new(config: Arc<AgentConfig>, adapter: Arc<dyn ResponseAdapter>) -> Self {
        Self { config, adapter }
    }
}

impl From<AgentConfig> for AgentState {
    fn from(config: AgentConfig) -> Self {
        Self::new(Arc::new(config), Arc::new(QueryResponseAdapter::new()))
    }
}

impl std::fmt::Debug for AgentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
