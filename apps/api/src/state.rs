use std::sync::{Arc, Mutex};

use crate::config::Config;
use crate::export::PdfRenderer;
use crate::settings::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum
/// extractors.
///
/// The store itself is synchronous and unsynchronized by design; the mutex
/// here is the caller-side serialization the core's concurrency model
/// assumes. A handler holds the lock across its whole
/// read-modify-write-persist step, so at most one mutation is ever in flight
/// and readers only see fully-formed snapshots.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<ResumeStore>>,
    /// Pluggable PDF backend. Default: HttpPdfRenderer against RENDERER_URL.
    pub pdf: Arc<dyn PdfRenderer>,
    /// Kept on state for handlers that need runtime configuration.
    #[allow(dead_code)]
    pub config: Config,
}
