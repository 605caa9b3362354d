use std::fmt;
use std::str::FromStr;

/// How long a regular notice stays on screen, in milliseconds.
const DEFAULT_DURATION_MS: u64 = 4000;

/// Errors stay up longer so they are not missed.
const ERROR_DURATION_MS: u64 = 6000;

/// Visual kind of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NoticeKind {
    fn duration_ms(self) -> u64 {
        match self {
            NoticeKind::Error => ERROR_DURATION_MS,
            _ => DEFAULT_DURATION_MS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
            NoticeKind::Warning => "warning",
            NoticeKind::Info => "info",
        }
    }
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the `type` value that accompanies a `message` query parameter.
///
/// `danger` is accepted as an alias of `error`. Matching is
/// case-insensitive.
impl FromStr for NoticeKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "success" => Ok(NoticeKind::Success),
            "error" | "danger" => Ok(NoticeKind::Error),
            "warning" => Ok(NoticeKind::Warning),
            "info" => Ok(NoticeKind::Info),
            _ => Err(UnknownKind(s.to_owned())),
        }
    }
}

/// Returned when a notice kind string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown notice kind: {0}")]
pub struct UnknownKind(pub String);

/// A single user-visible notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
    /// `None` for the sticky site banner, which has no timeout.
    pub duration_ms: Option<u64>,
}

/// Notices waiting to be shown, plus the single site banner.
///
/// Timed dismissal belongs to the front end; the board only stores what is
/// pending and hands out monotonic ids.
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
    banner: Option<Notice>,
    next_id: u64,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Queues a timed notice and returns its id.
    pub fn push(&mut self, kind: NoticeKind, message: impl Into<String>) -> u64 {
        let id = self.allocate_id();
        let message = message.into();
        tracing::debug!(id, %kind, %message, "notice queued");
        self.notices.push(Notice {
            id,
            kind,
            message,
            duration_ms: Some(kind.duration_ms()),
        });
        id
    }

    /// Queues an error notice.
    pub fn register_error(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeKind::Error, message)
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeKind::Info, message)
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeKind::Success, message)
    }

    pub fn warning(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeKind::Warning, message)
    }

    /// Shows the sticky site banner, replacing any previous one.
    pub fn register_site_notification(
        &mut self,
        message: impl Into<String>,
        kind: NoticeKind,
    ) -> u64 {
        let id = self.allocate_id();
        self.banner = Some(Notice {
            id,
            kind,
            message: message.into(),
            duration_ms: None,
        });
        id
    }

    /// Like [`register_site_notification`](Self::register_site_notification)
    /// but takes the kind as a raw string. Unrecognised kinds fall back to
    /// info.
    pub fn register_site_notification_str(&mut self, message: impl Into<String>, kind: &str) -> u64 {
        let kind = kind.parse().unwrap_or_else(|e: UnknownKind| {
            tracing::warn!("{e}, showing as info");
            NoticeKind::Info
        });
        self.register_site_notification(message, kind)
    }

    /// Current site banner, if any.
    pub fn banner(&self) -> Option<&Notice> {
        self.banner.as_ref()
    }

    /// Dismisses a notice or the banner by id. Returns `true` if found.
    pub fn dismiss(&mut self, id: u64) -> bool {
        if self.banner.as_ref().is_some_and(|b| b.id == id) {
            self.banner = None;
            return true;
        }
        let before = self.notices.len();
        self.notices.retain(|n| n.id != id);
        self.notices.len() != before
    }

    /// Pending timed notices, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    /// Removes and returns every pending timed notice. The banner stays.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}
