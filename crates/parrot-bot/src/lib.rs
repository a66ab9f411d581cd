pub mod traits;
pub mod canned;

pub use traits::ReplyGenerator;
pub use canned::{
    is_canned_reply, render, CannedReplyGenerator, FixedReplyGenerator, CANNED_TEMPLATES,
    MESSAGE_PLACEHOLDER,
};
