//! Application wiring: terminal lifecycle and the async runtime loop.

mod runtime;
pub mod terminal;

pub use runtime::run;
