//! Record synthesis
//!
//! Turns a classified page into one instruction/response training pair and
//! defines the chat-style JSON shape records are written in.

use serde::{Deserialize, Serialize, Serializer};
use sha2::{Digest, Sha256};

/// Joined code shorter than this (in characters) produces no record
pub const MIN_CODE_CHARS: usize = 100;

/// Separator placed between code fragments
pub const FRAGMENT_SEPARATOR: &str = "\n\n";

/// One emitted instruction/response pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// The user-side instruction
    pub prompt: String,

    /// The assistant-side answer with the fenced code body
    pub response: String,

    /// Prose summary of the source page; kept for logging, not written
    pub summary: String,
}

/// Chat role of a message in the written record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: Role,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRecord<'a> {
    messages: [ChatMessage<'a>; 2],
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ChatRecord {
            messages: [
                ChatMessage {
                    role: Role::User,
                    content: &self.prompt,
                },
                ChatMessage {
                    role: Role::Assistant,
                    content: &self.response,
                },
            ],
        }
        .serialize(serializer)
    }
}

impl Record {
    /// Hex SHA-256 of the response, used to spot repeated answers
    pub fn response_digest(&self) -> String {
        hex::encode(Sha256::digest(self.response.as_bytes()))
    }
}

/// Builds the fixed instruction prompt for a page title
pub fn build_prompt(title: &str) -> String {
    format!(
        "Explain how to implement {} when writing an operating system in C for x86_64. \
         Provide a complete, working code example without standard library dependencies.",
        title
    )
}

/// Builds the fixed response wrapping `code` in a C fence
pub fn build_response(title: &str, code: &str) -> String {
    format!(
        "Here is a correct implementation for {} in C (x86_64 bare-metal):\n\n```c\n{}\n```",
        title, code
    )
}

/// Joins cleaned fragments with a blank line between them
pub fn join_code<S: AsRef<str>>(fragments: &[S]) -> String {
    fragments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(FRAGMENT_SEPARATOR)
}

/// Builds the record for a page, or `None` when the code body is too short
///
/// # Example
///
/// ```
/// use osdev_corpus::record::synthesize;
///
/// let code = vec!["void f(void) {}".repeat(10)];
/// let record = synthesize("Paging", &code, "About paging.").unwrap();
/// assert!(record.prompt.contains("Paging"));
/// assert!(synthesize("Paging", &["void f(void) {}"], "").is_none());
/// ```
pub fn synthesize<S: AsRef<str>>(title: &str, code: &[S], summary: &str) -> Option<Record> {
    let body = join_code(code);
    if body.chars().count() < MIN_CODE_CHARS {
        return None;
    }

    Some(Record {
        prompt: build_prompt(title),
        response: build_response(title, &body),
        summary: summary.to_string(),
    })
}
