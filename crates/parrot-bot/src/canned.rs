use rand::seq::IndexedRandom;

use crate::traits::ReplyGenerator;

pub const MESSAGE_PLACEHOLDER: &str = "{message}";

/// The complete set of replies the chatbot can give.
pub const CANNED_TEMPLATES: [&str; 4] = [
    "That's interesting! You said: {message}",
    "I see what you mean by: {message}",
    "Let me think about: {message}",
    "I appreciate your thoughts on: {message}",
];

/// Substitute `message` into `template`.
///
/// Only the template is scanned for the placeholder, so a message that itself
/// contains `{message}` comes out verbatim.
pub fn render(template: &str, message: &str) -> String {
    template.replacen(MESSAGE_PLACEHOLDER, message, 1)
}

/// True when `reply` is one of the canned templates rendered with `message`.
pub fn is_canned_reply(reply: &str, message: &str) -> bool {
    CANNED_TEMPLATES
        .iter()
        .any(|template| render(template, message) == reply)
}

/// Picks a template uniformly at random for every reply
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedReplyGenerator;

impl CannedReplyGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ReplyGenerator for CannedReplyGenerator {
    fn reply(&self, message: &str) -> String {
        let template = CANNED_TEMPLATES
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(CANNED_TEMPLATES[0]);
        tracing::trace!(template, "Selected canned reply");
        render(template, message)
    }
}

/// Always answers with the same template
#[derive(Debug, Clone, Copy)]
pub struct FixedReplyGenerator {
    index: usize,
}

impl FixedReplyGenerator {
    /// `index` wraps around the template list.
    pub fn new(index: usize) -> Self {
        Self {
            index: index % CANNED_TEMPLATES.len(),
        }
    }
    
    pub fn template(&self) -> &'static str {
        CANNED_TEMPLATES[self.index]
    }
}

impl ReplyGenerator for FixedReplyGenerator {
    fn reply(&self, message: &str) -> String {
        render(self.template(), message)
    }
}
