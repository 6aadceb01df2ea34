//! Command parsing and mention resolution.

use messenger_client::IncomingMessage;
use std::collections::BTreeMap;

/// Token a user types to target themselves.
pub const SELF_MARKER: &str = "@me";

/// Display tag used when a command targets its own sender.
pub const SELF_TAG: &str = "you";

/// User a command is aimed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedUser {
    pub id: String,
    pub tag: String,
}

impl TaggedUser {
    pub fn sender(sender_id: &str) -> Self {
        Self {
            id: sender_id.to_string(),
            tag: SELF_TAG.to_string(),
        }
    }
}

/// A message broken into command key, arguments and target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// First token, lower-cased.
    pub key: String,
    /// Remaining whitespace-separated tokens.
    pub args: Vec<String>,
    pub tagged: Option<TaggedUser>,
    /// Text after the tagged user's name (or the `@me` marker).
    pub content_after_tag: String,
    /// Text after the command token.
    pub content_after_command: String,
}

impl ParsedCommand {
    /// Parse a message. Returns `None` for a blank body.
    pub fn parse(message: &IncomingMessage) -> Option<Self> {
        let body = message.body.trim();
        let mut tokens = body.split_whitespace();
        let first = tokens.next()?;

        let key = first.to_lowercase();
        let args = tokens.map(String::from).collect();
        // `body` is trimmed, so it starts with `first`.
        let content_after_command = body[first.len()..].trim().to_string();

        let (tagged, content_after_tag) = match first_mention(body, &message.mentions) {
            Some((id, name)) => (
                Some(TaggedUser {
                    id: id.to_string(),
                    tag: name.to_string(),
                }),
                text_after(body, name),
            ),
            None => match find_self_marker(body) {
                Some(pos) => (
                    Some(TaggedUser::sender(&message.sender_id)),
                    body[pos + SELF_MARKER.len()..].trim().to_string(),
                ),
                None => (None, String::new()),
            },
        };

        Some(Self {
            key,
            args,
            tagged,
            content_after_tag,
            content_after_command,
        })
    }

    /// The tagged user, or the sender when nobody is tagged.
    pub fn target_or_sender(&self, sender_id: &str) -> TaggedUser {
        self.tagged
            .clone()
            .unwrap_or_else(|| TaggedUser::sender(sender_id))
    }

    /// Free-text argument for commands with an optional target: the text
    /// after the tag when someone is tagged, otherwise after the command.
    pub fn target_text(&self) -> &str {
        if self.tagged.is_some() {
            &self.content_after_tag
        } else {
            &self.content_after_command
        }
    }

    /// Like [`target_text`](Self::target_text), but falls back to the text
    /// after the command when nothing follows the tag.
    pub fn target_text_or_rest(&self) -> &str {
        match self.target_text() {
            "" => &self.content_after_command,
            text => text,
        }
    }
}

/// Pick the mention whose name appears first in the body. Names missing from
/// the body sort last; ties go to the lowest user id.
fn first_mention<'a>(
    body: &str,
    mentions: &'a BTreeMap<String, String>,
) -> Option<(&'a str, &'a str)> {
    mentions
        .iter()
        .map(|(id, name)| (id.as_str(), name.as_str()))
        .min_by_key(|&(id, name)| (body.find(name).unwrap_or(usize::MAX), id))
}

fn text_after(body: &str, needle: &str) -> String {
    body.find(needle)
        .map(|i| body[i + needle.len()..].trim().to_string())
        .unwrap_or_default()
}

/// Byte offset of the first standalone, case-insensitive `@me` token.
fn find_self_marker(body: &str) -> Option<usize> {
    let mut offset = 0;
    for token in body.split_whitespace() {
        let pos = offset + body[offset..].find(token)?;
        if token.eq_ignore_ascii_case(SELF_MARKER) {
            return Some(pos);
        }
        offset = pos + token.len();
    }
    None
}
