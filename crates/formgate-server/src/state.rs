use std::sync::Arc;

use formgate_core::FileSubmissionService;
use formgate_types::{FormgateConfig, Result};

/// Shared handler state: the configuration and the one submission service.
pub struct State {
    pub config: FormgateConfig,
    pub service: FileSubmissionService,
}

impl State {
    pub fn new(config: FormgateConfig) -> Result<Arc<Self>> {
        let service = FileSubmissionService::open(&config)?;
        Ok(Arc::new(Self { config, service }))
    }
}
