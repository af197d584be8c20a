//! Thread-local context for crash reports.
//!
//! Each thread keeps its own context, so rayon workers scoring a batch don't
//! clobber the main thread's phase. Guards restore the previous context on
//! drop, which makes nesting (a target within a phase) work naturally.

use std::cell::RefCell;

thread_local! {
    static CURRENT_CONTEXT: RefCell<RunContext> = const { RefCell::new(RunContext::new()) };
}

/// What the current thread was doing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunContext {
    pub phase: Option<Phase>,
    /// Event id, subscription id, file or location being worked on.
    pub target: Option<String>,
}

impl RunContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            target: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    ConfigLoading,
    StoreLoading,
    Scoring,
    StoreWriting,
    Alerting,
    OutputGeneration,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigLoading => write!(f, "config_loading"),
            Self::StoreLoading => write!(f, "store_loading"),
            Self::Scoring => write!(f, "scoring"),
            Self::StoreWriting => write!(f, "store_writing"),
            Self::Alerting => write!(f, "alerting"),
            Self::OutputGeneration => write!(f, "output_generation"),
        }
    }
}

/// Restores the previous context when dropped.
pub struct ContextGuard {
    previous: RunContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous.clone();
        });
    }
}

fn update(apply: impl FnOnce(&mut RunContext)) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        apply(&mut ctx.borrow_mut());
        ContextGuard { previous }
    })
}

#[must_use]
pub fn set_phase(phase: Phase) -> ContextGuard {
    update(|ctx| ctx.phase = Some(phase))
}

#[must_use]
pub fn set_current_target(target: impl Into<String>) -> ContextGuard {
    let target = target.into();
    update(|ctx| ctx.target = Some(target))
}

#[must_use]
pub fn get_current_context() -> RunContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

pub fn reset_context() {
    CURRENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = RunContext::new();
    });
}
