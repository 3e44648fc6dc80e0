// Text generation backends — trait-based abstraction over the LLM provider.
//
// The GrammarBackend trait defines the interface. GeminiClient implements it
// using Google's generateContent API. The checker only ever sees the trait,
// so tests drive it with canned responses instead of network calls.

pub mod gemini;
pub mod traits;
