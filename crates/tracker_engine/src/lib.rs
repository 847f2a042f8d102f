//! Tracker engine: backend client and effect execution for the core state machine.
mod backend;
mod debounce;
mod persist;
mod presenter;
mod types;
mod wire;

pub use backend::{Backend, BackendSettings, ReqwestBackend, RESUME_FIELD};
pub use debounce::Debouncer;
pub use persist::{ensure_state_dir, AtomicFileWriter, PersistError};
pub use presenter::JobListPresenter;
pub use types::{BackendError, FailureKind};
pub use wire::JobRecord;
