use super::SearchScope;

/// Command - a parsed chat command
///
/// Built by `CommandRouter::route`. The keyword keeps the user's casing;
/// dispatch goes through `kind()`, which matches case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    raw_text: String,
    keyword: String,
    arguments: Vec<String>,
}

impl Command {
    pub fn new(raw_text: impl Into<String>, keyword: impl Into<String>, arguments: Vec<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            keyword: keyword.into(),
            arguments,
        }
    }

    /// The trimmed input text the command was parsed from
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn first_argument(&self) -> Option<&str> {
        self.arguments.first().map(String::as_str)
    }

    pub fn kind(&self) -> CommandKind {
        CommandKind::from_keyword(&self.keyword)
    }

    /// True when the command lacks arguments its kind requires
    pub fn is_missing_arguments(&self) -> bool {
        self.arguments.len() < self.kind().required_arguments()
    }
}

/// CommandKind - every keyword the bot understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Help,
    SearchIp(SearchScope),
    SearchDomain,
    Test,
    Unknown,
}

impl CommandKind {
    /// Maps a keyword to its kind, ignoring case
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.to_lowercase().as_str() {
            "help" => CommandKind::Help,
            "searchip" => CommandKind::SearchIp(SearchScope::Strict),
            "searchipext" => CommandKind::SearchIp(SearchScope::Extended),
            "searchdomain" => CommandKind::SearchDomain,
            "test" => CommandKind::Test,
            _ => CommandKind::Unknown,
        }
    }

    pub fn required_arguments(self) -> usize {
        match self {
            CommandKind::SearchIp(_) => 1,
            CommandKind::Help
            | CommandKind::SearchDomain
            | CommandKind::Test
            | CommandKind::Unknown => 0,
        }
    }
}
