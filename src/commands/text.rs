//! Plain-text commands (`!food`, `/addfood Pho`) typed into a channel
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.1.0

use anyhow::Result;
use regex::Regex;

use super::handler::Invocation;

/// `!name` or `/name`, an optional `@botname` suffix, then free-form arguments
const TEXT_COMMAND_PATTERN: &str = r"(?s)^[!/]([A-Za-z]+)(?:@\S+)?(?:\s+(.*))?$";

/// Parse a message into an invocation. Messages that are not commands give `None`.
pub fn parse_text_command(content: &str, username: &str) -> Result<Option<Invocation>> {
    let pattern = Regex::new(TEXT_COMMAND_PATTERN)?;
    let Some(captures) = pattern.captures(content.trim()) else {
        return Ok(None);
    };

    let command = captures.get(1).map_or("", |m| m.as_str());
    let argument = captures.get(2).map_or("", |m| m.as_str());
    Ok(Some(Invocation::new(command, argument, username)))
}
