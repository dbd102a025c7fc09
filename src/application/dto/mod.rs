/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod inbound_request;

pub use inbound_request::{InboundRequest, ReplyTarget, RequestSource};
