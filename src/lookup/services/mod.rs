mod command_router;
mod defang;
pub mod mrkdwn;
mod result_renderer;
mod timestamp;

pub use command_router::CommandRouter;
pub use defang::defang;
pub use result_renderer::{ResultRenderer, ERROR_REPORT, NO_RESULTS};
pub use timestamp::format_timestamp;
