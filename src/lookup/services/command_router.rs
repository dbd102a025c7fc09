use crate::lookup::domain::Command;

/// CommandRouter - turns raw chat text into a `Command`
///
/// The first whitespace-separated token is the keyword, every further token
/// is an argument. Arguments are passed through unmodified.
pub struct CommandRouter;

impl CommandRouter {
    pub fn route(raw_text: &str) -> Command {
        let trimmed = raw_text.trim();
        let mut tokens = trimmed.split_whitespace();

        let keyword = tokens.next().unwrap_or_default();
        let arguments = tokens.map(str::to_string).collect();

        Command::new(trimmed, keyword, arguments)
    }
}
