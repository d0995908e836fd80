//! Reply chunking for long command output
//!
//! The core renders lists without any length limit; replies are cut here
//! before they are handed to Discord as embed descriptions.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Annotate the first chunk with a part counter
//! - 1.0.0: Line-aware, UTF-8 safe chunking

/// Discord embed description limit
pub const EMBED_LIMIT: usize = 4096;

/// Size of one reply chunk, leaving headroom under the embed limit for the
/// part counter
pub const REPLY_CHUNK_LIMIT: usize = 4000;

/// Split text into pieces of at most `max_size` bytes.
///
/// Prefers line boundaries and never splits inside a character. Lines longer
/// than `max_size` are cut at character boundaries.
pub fn chunk_text(text: &str, max_size: usize) -> Vec<String> {
    if text.len() <= max_size {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        // +1 for the newline that joins it to the next line
        if !current.is_empty() && current.len() + line.len() + 1 > max_size {
            chunks.push(std::mem::take(&mut current));
        }

        if line.len() > max_size {
            chunks.extend(split_long_line(line, max_size));
            continue;
        }

        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn split_long_line(line: &str, max_size: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();

    for ch in line.chars() {
        if !current.is_empty() && current.len() + ch.len_utf8() > max_size {
            pieces.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }

    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Chunk a reply for sending. When the reply needs more than one chunk, the
/// first one starts with a `Part 1/N` line so the reader knows more follows.
pub fn chunk_reply(text: &str) -> Vec<String> {
    let mut chunks = chunk_text(text, REPLY_CHUNK_LIMIT);
    let total = chunks.len();
    if total > 1 {
        chunks[0] = format!("📄 Part 1/{total}\n{}", chunks[0]);
    }
    chunks
}
