use std::sync::Arc;

use crate::domain::common::GenerationConfig;

/// Application service; its use-case traits are implemented per domain in `services.rs` files.
pub struct Service<TC> {
    pub(crate) text_completer: Arc<TC>,
    pub(crate) generation: GenerationConfig,
}

impl<TC> Service<TC> {
    pub fn new(text_completer: TC, generation: GenerationConfig) -> Self {
        Self {
            text_completer: Arc::new(text_completer),
            generation,
        }
    }
}

impl<TC> Clone for Service<TC> {
    fn clone(&self) -> Self {
        Self {
            text_completer: Arc::clone(&self.text_completer),
            generation: self.generation.clone(),
        }
    }
}
