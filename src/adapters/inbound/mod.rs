/// Inbound adapters - Slack payload intake
///
/// Payloads arrive over a Socket Mode websocket or, for dry runs, as JSON
/// lines on stdin. These adapters turn transport payloads into requests for the
/// CommandPort and hand the replies to a ReplyPresenter.
mod slack_payload;
mod socket_mode;
mod stdin_listener;

pub use slack_payload::parse_payload;
pub use socket_mode::SocketModeListener;
pub use stdin_listener::{ListenerStats, SlackListener, MAX_CONCURRENT_REQUESTS};
