/// Network adapters for external API calls
mod misp_client;
mod slack_client;

pub use misp_client::MispClient;
pub use slack_client::SlackWebPresenter;
