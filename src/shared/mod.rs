/// Shared kernel - error types and the crate-wide Result alias
pub mod error;
pub mod result;

pub use error::{BotError, ExitCode};
pub use result::Result;

#[cfg(test)]
pub(crate) mod test_http;
