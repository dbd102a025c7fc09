/// Use cases module containing application business logic orchestration
mod handle_command;

pub use handle_command::{HandleCommandUseCase, DEFAULT_SEARCH_TIMEOUT};
