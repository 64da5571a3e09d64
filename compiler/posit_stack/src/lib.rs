//! Stack safety for deeply nested argument arrays.
//!
//! Persisted specs may nest arrays arbitrarily deep, and both signature
//! checking and marshalling recurse once per nesting level. Recursive
//! steps are wrapped in [`ensure_sufficient_stack`] so a hostile or
//! machine-generated spec cannot overflow the thread stack.
//!
//! - **Native targets**: grows the stack on demand via `stacker`.
//! - **WASM targets**: plain call; the runtime manages its own stack.

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
