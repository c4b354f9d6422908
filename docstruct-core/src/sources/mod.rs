// Page source abstraction — the injected extraction capability.
//
// The engine never reads a binary document container itself. Anything
// that can produce an ordered sequence of per-page plain-text strings
// can drive it; everything after this boundary is format-agnostic.

mod plain_text;
mod source;

pub use plain_text::PlainTextSource;
pub use source::PageSource;
