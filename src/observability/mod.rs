//! Crash reports, phase tracking and log/tracing setup.
//!
//! Install the panic hook and subscriber once, at the top of `main`:
//!
//! ```ignore
//! use floodcast::observability::{init_tracing, install_panic_hook};
//!
//! install_panic_hook();
//! init_tracing(cli.verbose);
//! ```
//!
//! Commands mark the phase they are in so a crash report can say what the
//! process was doing:
//!
//! ```ignore
//! use floodcast::observability::{set_phase, Phase};
//!
//! let _phase = set_phase(Phase::StoreLoading);
//! let store = EventStore::open(&path)?;
//! ```

pub mod context;
pub mod panic_hook;
pub mod tracing;

pub use context::{
    get_current_context, reset_context, set_current_target, set_phase, ContextGuard, Phase,
    RunContext,
};
pub use panic_hook::install_panic_hook;
pub use self::tracing::{filter_directive, init_tracing};
