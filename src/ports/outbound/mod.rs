/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (MISP, Slack, console).
pub mod indicator_repository;
pub mod reply_presenter;

pub use indicator_repository::IndicatorRepository;
pub use reply_presenter::ReplyPresenter;
