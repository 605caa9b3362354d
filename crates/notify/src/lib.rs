//! User-visible notices for the GameHub front end.
//!
//! Load failures, unknown games and similar recoverable problems end up
//! here instead of being raised further. A front end drains the board and
//! shows the notices however it likes.

mod notice;

pub use notice::{Notice, NoticeBoard, NoticeKind, UnknownKind};
