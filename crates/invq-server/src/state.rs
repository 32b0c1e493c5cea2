use std::sync::Arc;

use invq_core::DocumentExtractor;
use invq_datastore::Datastore;

/// Shared handler dependencies. Holds no per-request data.
#[derive(Clone)]
pub struct AppState {
    pub datastore: Arc<dyn Datastore>,
    pub extractor: Arc<dyn DocumentExtractor>,
}

impl AppState {
    pub fn new(
        datastore: impl Datastore + 'static,
        extractor: impl DocumentExtractor + 'static,
    ) -> Self {
        Self {
            datastore: Arc::new(datastore),
            extractor: Arc::new(extractor),
        }
    }
}
