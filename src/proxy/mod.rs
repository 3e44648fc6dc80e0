// Correction proxy — prompt construction, LLM call, reply parsing.
//
// The checker validates input, takes the next key from the pool, asks the
// backend for a verdict and normalises whatever JSON comes back. All
// failure modes end up as a CheckError so the web layer can map them to
// status codes in one place.

pub mod checker;
pub mod extract;
pub mod prompt;

pub use checker::{CheckError, CheckResult, GrammarChecker};
pub use prompt::Language;
