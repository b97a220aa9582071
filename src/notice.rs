//! Transient user-facing notices
//!
//! A notice is shown until its timeout elapses. Time is passed in explicitly
//! (from a `TimeSource`) so expiry is deterministic in tests.

use std::time::{Duration, Instant};

/// How long a notice stays visible unless told otherwise.
pub const DEFAULT_NOTICE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub shown_at: Instant,
    pub timeout: Duration,
}

impl Notice {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.timeout
    }
}

/// Notices currently on screen, oldest first.
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: impl Into<String>, now: Instant) -> &Notice {
        self.show_for(message, now, DEFAULT_NOTICE_TIMEOUT)
    }

    pub fn show_for(&mut self, message: impl Into<String>, now: Instant, timeout: Duration) -> &Notice {
        self.notices.push(Notice {
            message: message.into(),
            shown_at: now,
            timeout,
        });
        &self.notices[self.notices.len() - 1]
    }

    /// Notices still visible at `now`.
    pub fn visible(&self, now: Instant) -> impl Iterator<Item = &Notice> + '_ {
        self.notices.iter().filter(move |n| !n.is_expired(now))
    }

    /// Drop notices whose timeout has passed.
    pub fn expire(&mut self, now: Instant) {
        self.notices.retain(|n| !n.is_expired(now));
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.notices.last()
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_expires_after_timeout() {
        let start = Instant::now();
        let mut board = NoticeBoard::new();
        board.show("saved", start);

        assert_eq!(board.visible(start).count(), 1);
        assert_eq!(board.visible(start + Duration::from_secs(4)).count(), 1);
        assert_eq!(board.visible(start + DEFAULT_NOTICE_TIMEOUT).count(), 0);

        board.expire(start + Duration::from_secs(6));
        assert!(board.is_empty());
    }

    #[test]
    fn test_notices_expire_independently() {
        let start = Instant::now();
        let mut board = NoticeBoard::new();
        board.show_for("short", start, Duration::from_secs(1));
        board.show("long", start);

        let later = start + Duration::from_secs(2);
        let visible: Vec<_> = board.visible(later).map(|n| n.message.as_str()).collect();
        assert_eq!(visible, vec!["long"]);

        board.expire(later);
        assert_eq!(board.len(), 1);
        assert_eq!(board.latest().unwrap().message, "long");
    }
}
