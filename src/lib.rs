// gramcheck: LLM-backed grammar checking with rotating API keys
//
// This is the library root. Each module corresponds to one piece of the
// check flow: key rotation, the generation backend, the correction proxy,
// and highlighting of flagged words.

pub mod backend;
pub mod config;
pub mod highlight;
pub mod output;
pub mod proxy;
pub mod rotator;

#[cfg(feature = "web")]
pub mod web;
