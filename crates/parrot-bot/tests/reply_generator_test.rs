use std::collections::HashSet;
use std::sync::Arc;

use parrot_bot::{
    is_canned_reply, CannedReplyGenerator, FixedReplyGenerator, ReplyGenerator, CANNED_TEMPLATES,
};

#[test]
fn test_canned_templates_are_exact() {
    assert_eq!(
        CANNED_TEMPLATES,
        [
            "That's interesting! You said: {message}",
            "I see what you mean by: {message}",
            "Let me think about: {message}",
            "I appreciate your thoughts on: {message}",
        ]
    );
}

#[test]
fn test_random_replies_stay_in_template_set() {
    let generator = CannedReplyGenerator::new();
    for message in ["hello world", "", "ünïcödé ✓", "multi\nline"] {
        for _ in 0..20 {
            let reply = generator.reply(message);
            assert!(is_canned_reply(&reply, message), "unexpected reply: {reply}");
        }
    }
}

#[test]
fn test_random_replies_use_more_than_one_template() {
    let generator = CannedReplyGenerator::new();
    let seen: HashSet<String> = (0..200).map(|_| generator.reply("x")).collect();
    // 200 uniform draws over 4 templates all landing on one is ~1e-120
    assert!(seen.len() > 1);
}

#[test]
fn test_fixed_generator_is_deterministic() {
    for (index, template) in CANNED_TEMPLATES.iter().enumerate() {
        let generator = FixedReplyGenerator::new(index);
        assert_eq!(generator.reply("hi"), template.replace("{message}", "hi"));
        assert_eq!(generator.reply("hi"), generator.reply("hi"));
    }
}

#[test]
fn test_generators_work_behind_trait_objects() {
    let generator: Arc<dyn ReplyGenerator> = Arc::new(FixedReplyGenerator::new(0));
    assert_eq!(generator.reply("ok"), "That's interesting! You said: ok");
}
