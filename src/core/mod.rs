//! Core engines for the SAI companion

pub mod adaptive;
pub mod api;
pub mod router;
pub mod store;
pub mod stress;
pub mod tracker;
pub mod triggers;

pub use adaptive::GuidanceBuilder;
pub use api::{create_router, run_server};
pub use router::PathRouter;
pub use store::{load_and_validate_state, load_state, save_state, PersistedState};
pub use stress::StressDetector;
pub use tracker::EmotionalStateTracker;
