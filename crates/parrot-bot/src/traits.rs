/// Produces the chatbot's answer to a user message
/// 
/// Held behind `Arc<dyn ReplyGenerator>` so the selection policy can be
/// swapped, e.g. for a deterministic one in tests.
pub trait ReplyGenerator: Send + Sync {
    fn reply(&self, message: &str) -> String;
}
