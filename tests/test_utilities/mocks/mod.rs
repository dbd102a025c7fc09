/// Mock implementations for testing
mod mock_indicator_repository;
mod mock_reply_presenter;

pub use mock_indicator_repository::MockIndicatorRepository;
pub use mock_reply_presenter::MockReplyPresenter;
