//! Fixed reply texts.
//!
//! Replies use Slack mrkdwn, so the asterisks, backticks and emoji codes are
//! what the user sees rendered.

use crate::lookup::services::defang;

pub const MISSING_PARAMETERS: &str = "*Error: Missing parameters*";

pub const INVALID_COMMAND: &str = "*Error: Invalid command*\nCheck /mispbot help";

pub const SEARCH_DOMAIN_NOT_IMPLEMENTED: &str = "Search Domain is not implemented yet!";

pub const HELP_TEXT: &str = concat!(
    "*MispBot Help*\n\n\n",
    "*/mispbot vs @mispbot*\n",
    ":black_small_square:`/mispbot` command and results are only viewable to user.\n",
    ":black_small_square:`@mispbot` command and results are visible to the entire channel.\n\n",
    "Otherwise, they work in exactly the same way:\n",
    ":black_small_square:`/mispbot <command> <IOC>`\n",
    ":black_small_square:`@mispbot <command> <IOC>`\n\n\n\n",
    "*Command: help*\n",
    "The help command lists all MispBot commands with instructions.\n\n",
    "Example: `/mispbot help`\n\n\n\n",
    "*Command: searchip*\n",
    "The searchip command accepts an IP address as an argument and returns a list of published events ",
    "where the IP address is listed as an attribute with the IDS flag set to True.\n\n",
    "Example: `/mispbot searchip 93.184.216.34`\n\n\n\n",
    "*Command: searchipext*\n",
    "The searchipext command accepts an IP address as an argument and returns a list of both published ",
    "and unpublished events where the IP address is listed as an attribute ",
    "(regardless of whether the IDS flag is true).\n\n",
    "Example: `/mispbot searchipext 93.184.216.34`\n\n\n\n",
    "*Command: searchdomain (coming soon)*\n",
    "The searchdomain command accepts a domain as an argument and returns a list of published events ",
    "where the domain is listed as an attribute with the IDS flag set to True.\n\n",
    "Example: `/mispbot searchdomain example.com`\n\n\n\n",
    "*Command: searchdomainext (coming soon)*\n",
    "The searchdomainext command accepts a domain as an argument and returns a list of both published ",
    "and unpublished events where the domain is listed as an attribute ",
    "(regardless of whether the IDS flag is true).\n\n",
    "Example: `/mispbot searchdomainext example.com`\n\n\n\n",
    "*Command: reversedns (coming soon)*\n",
    "The reversedns command accepts an IP address as an argument and returns the domain or, ",
    "in the case of multiple domains due to shared hosting, it will return the original IP address.\n\n",
    "Example: `/mispbot reversedns 8.8.8.8`\n\n\n\n",
    "*Command: resolvedomain (coming soon)*\n",
    "The resolvedomain command accepts a domain as an argument and returns the IP address.\n\n",
    "Example: `/mispbot resolvedomain google.com`",
);

/// Header placed above search results, echoing the (defanged) request
pub fn search_header(raw_text: &str) -> String {
    format!("*Search results for: {}*\n\n", defang(raw_text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_header_defangs_request() {
        assert_eq!(
            search_header("searchip 1.2.3.4"),
            "*Search results for: searchip 1[.]2[.]3[.]4*\n\n"
        );
    }

    #[test]
    fn test_help_text_lists_commands() {
        for command in ["help", "searchip", "searchipext", "searchdomain"] {
            assert!(HELP_TEXT.contains(&format!("*Command: {}", command)));
        }
        assert!(HELP_TEXT.starts_with("*MispBot Help*"));
        assert!(HELP_TEXT.ends_with("`/mispbot resolvedomain google.com`"));
    }

    #[test]
    fn test_error_messages_are_distinct() {
        assert_ne!(MISSING_PARAMETERS, INVALID_COMMAND);
        assert!(INVALID_COMMAND.contains("/mispbot help"));
    }
}
