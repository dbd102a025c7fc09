/// Application layer - Use cases, DTOs and reply texts
///
/// This layer contains the application logic that orchestrates
/// domain services and coordinates with infrastructure through ports.
pub mod dto;
pub mod messages;
pub mod use_cases;
