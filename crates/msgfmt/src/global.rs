//! Process-wide function registry.
//!
//! Messages created with [`MessageFormat::new`](crate::MessageFormat::new)
//! resolve functions here. The registry starts empty; register functions
//! during setup, before formatting begins. Each formatting call takes a
//! snapshot, so registration never blocks on running functions, but
//! registering while other threads format is unsupported: those calls may
//! see either the old or the new table.

use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use tracing::debug;

use crate::functions;
use crate::interpreter::{EvalError, FormattingContext, FunctionRegistry, ResolvedOptions};
use crate::types::Value;

static GLOBAL_REGISTRY: LazyLock<RwLock<Arc<FunctionRegistry>>> =
    LazyLock::new(|| RwLock::new(Arc::new(FunctionRegistry::new())));

/// Returns the current registry.
pub fn snapshot() -> Arc<FunctionRegistry> {
    let guard = GLOBAL_REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner);
    Arc::clone(&guard)
}

/// Provides write access to the global registry.
///
/// Snapshots taken earlier are unaffected.
pub fn with_registry_mut<T>(f: impl FnOnce(&mut FunctionRegistry) -> T) -> T {
    let mut guard = GLOBAL_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    f(Arc::make_mut(&mut guard))
}

/// Registers a formatter in the global registry.
pub fn register_formatter<F>(name: impl Into<String>, function: F)
where
    F: Fn(&FormattingContext<'_>, Option<&Value>, &ResolvedOptions) -> Result<Value, EvalError>
        + Send
        + Sync
        + 'static,
{
    let name = name.into();
    debug!(%name, "registering global formatter");
    with_registry_mut(|registry| registry.register_formatter(name, function));
}

/// Registers a matcher in the global registry.
pub fn register_matcher<F>(name: impl Into<String>, function: F)
where
    F: Fn(&FormattingContext<'_>, Option<&Value>, &ResolvedOptions) -> Result<Value, EvalError>
        + Send
        + Sync
        + 'static,
{
    let name = name.into();
    debug!(%name, "registering global matcher");
    with_registry_mut(|registry| registry.register_matcher(name, function));
}

/// Registers the built-in functions in the global registry.
pub fn register_builtins() {
    with_registry_mut(functions::register_builtins);
}
