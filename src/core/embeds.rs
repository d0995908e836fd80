//! Reply embed builders
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.1.0

use serenity::builder::CreateEmbed;

/// Accent color of a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Failure,
}

impl Tone {
    pub fn color(self) -> u32 {
        match self {
            Tone::Info => 0xF39C12,    // Warm orange - food
            Tone::Success => 0x27AE60, // Green
            Tone::Failure => 0xE74C3C, // Red
        }
    }
}

/// Fill an embed in place, for builders that take a closure
pub fn fill_reply_embed<'a>(
    embed: &'a mut CreateEmbed,
    text: &str,
    tone: Tone,
) -> &'a mut CreateEmbed {
    embed.color(tone.color()).description(text)
}

/// Owned embed for `set_embed` style builders
pub fn reply_embed(text: &str, tone: Tone) -> CreateEmbed {
    let mut embed = CreateEmbed::default();
    fill_reply_embed(&mut embed, text, tone);
    embed
}
