//! Parser warnings with colored terminal output.
//!
//! Malformed markup never fails a parse; the tokenizer and tree builder recover
//! and report what they did here instead. Each unique message is printed once
//! per process (or until [`clear_warnings`] is called).

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

fn registry() -> MutexGuard<'static, Option<HashSet<String>>> {
    // A panic while holding the lock cannot leave the set half-updated.
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Warn about a recovered irregularity (prints once per unique message)
///
/// # Example
/// ```
/// quill_common::warning::warn_once("Tokenizer", "unterminated tag treated as text");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let should_print = registry()
        .get_or_insert_with(HashSet::new)
        .insert(key(component, message));

    if should_print {
        eprintln!("{}", format!("[quill {component}] ⚠ {message}").yellow());
    }
}

/// Returns true if `warn_once` has already reported this message.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    registry()
        .as_ref()
        .is_some_and(|set| set.contains(&key(component, message)))
}

/// Clear all recorded warnings.
///
/// ```
/// use quill_common::warning::{clear_warnings, has_warned, warn_once};
///
/// warn_once("Doc", "cleared example");
/// assert!(has_warned("Doc", "cleared example"));
/// clear_warnings();
/// assert!(!has_warned("Doc", "cleared example"));
/// ```
pub fn clear_warnings() {
    if let Some(set) = registry().as_mut() {
        set.clear();
    }
}
