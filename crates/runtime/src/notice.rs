use foundation::time::Time;

/// How long a success notice stays visible.
pub const NOTICE_TTL_S: f64 = 3.0;

#[derive(Debug, Clone, PartialEq)]
struct Notice {
    message: String,
    expires_at: Time,
}

/// A single auto-dismissing message slot. Showing a new message replaces the
/// previous one and restarts its timer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoticeSlot {
    current: Option<Notice>,
}

impl NoticeSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: impl Into<String>, now: Time) {
        self.show_for(message, now, NOTICE_TTL_S);
    }

    pub fn show_for(&mut self, message: impl Into<String>, now: Time, ttl_s: f64) {
        self.current = Some(Notice {
            message: message.into(),
            expires_at: now.after(ttl_s),
        });
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// The visible message at `now`, if any.
    pub fn message(&self, now: Time) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|n| now < n.expires_at)
            .map(|n| n.message.as_str())
    }

    /// Drops an expired message. Returns true if something was dismissed.
    pub fn expire(&mut self, now: Time) -> bool {
        match &self.current {
            Some(n) if now >= n.expires_at => {
                self.current = None;
                true
            }
            _ => false,
        }
    }
}
