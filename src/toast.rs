use std::collections::HashMap;
use std::time::{Duration, Instant};

pub const ENTER_DELAY: Duration = Duration::from_millis(100);
pub const EXIT_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    pub fn duration(self) -> Duration {
        match self {
            Self::Error => Duration::from_secs(10),
            _ => Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastMessage {
    pub text: String,
    pub kind: ToastKind,
    pub created_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Entering,
    Visible,
    Leaving,
}

impl ToastMessage {
    /// `None` once the toast has finished its exit.
    pub fn phase(&self, now: Instant) -> Option<ToastPhase> {
        let age = now.saturating_duration_since(self.created_at);
        let hide_at = self.kind.duration();
        if age < ENTER_DELAY {
            Some(ToastPhase::Entering)
        } else if age < hide_at {
            Some(ToastPhase::Visible)
        } else if age < hide_at + EXIT_DELAY {
            Some(ToastPhase::Leaving)
        } else {
            None
        }
    }

    /// Opacity for fading in and out.
    pub fn opacity(&self, now: Instant) -> f32 {
        let age = now.saturating_duration_since(self.created_at);
        match self.phase(now) {
            Some(ToastPhase::Entering) => age.as_secs_f32() / ENTER_DELAY.as_secs_f32(),
            Some(ToastPhase::Visible) => 1.0,
            Some(ToastPhase::Leaving) => {
                let left = (self.kind.duration() + EXIT_DELAY).saturating_sub(age);
                left.as_secs_f32() / EXIT_DELAY.as_secs_f32()
            }
            None => 0.0,
        }
    }
}

/// At most one live toast per kind; a new one evicts the old.
#[derive(Debug, Default)]
pub struct ToastQueue {
    active: HashMap<ToastKind, ToastMessage>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&mut self, text: impl Into<String>, kind: ToastKind) {
        self.notify_at(text, kind, Instant::now());
    }

    pub fn notify_at(&mut self, text: impl Into<String>, kind: ToastKind, now: Instant) {
        let text = text.into();
        log::debug!("toast {kind:?}: {text}");
        self.active.insert(
            kind,
            ToastMessage {
                text,
                kind,
                created_at: now,
            },
        );
    }

    pub fn prune(&mut self, now: Instant) {
        self.active.retain(|_, toast| toast.phase(now).is_some());
    }

    /// Live toasts, oldest first.
    pub fn active(&self, now: Instant) -> Vec<(&ToastMessage, ToastPhase)> {
        let mut live: Vec<_> = self
            .active
            .values()
            .filter_map(|toast| toast.phase(now).map(|phase| (toast, phase)))
            .collect();
        live.sort_by_key(|(toast, _)| toast.created_at);
        live
    }

    pub fn get(&self, kind: ToastKind) -> Option<&ToastMessage> {
        self.active.get(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_kind_evicts_previous() {
        let start = Instant::now();
        let mut queue = ToastQueue::new();
        queue.notify_at("retrying (1/2)", ToastKind::Warning, start);
        queue.notify_at("retrying (2/2)", ToastKind::Warning, start + Duration::from_secs(1));

        let live = queue.active(start + Duration::from_secs(1));
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].0.text, "retrying (2/2)");
    }

    #[test]
    fn kinds_do_not_evict_each_other() {
        let start = Instant::now();
        let mut queue = ToastQueue::new();
        queue.notify_at("starting", ToastKind::Info, start);
        queue.notify_at("redirecting", ToastKind::Success, start + Duration::from_millis(1));

        let texts: Vec<_> = queue
            .active(start + Duration::from_millis(200))
            .into_iter()
            .map(|(t, _)| t.text.as_str())
            .collect();
        assert_eq!(texts, vec!["starting", "redirecting"]);
    }

    #[test]
    fn lifecycle_phases() {
        let start = Instant::now();
        let toast = ToastMessage {
            text: "ok".into(),
            kind: ToastKind::Success,
            created_at: start,
        };
        assert_eq!(toast.phase(start), Some(ToastPhase::Entering));
        assert_eq!(toast.phase(start + Duration::from_millis(150)), Some(ToastPhase::Visible));
        assert_eq!(toast.phase(start + Duration::from_millis(5100)), Some(ToastPhase::Leaving));
        assert_eq!(toast.phase(start + Duration::from_millis(5300)), None);
        assert_eq!(toast.opacity(start + Duration::from_secs(2)), 1.0);
    }

    #[test]
    fn errors_live_twice_as_long() {
        let start = Instant::now();
        let mut queue = ToastQueue::new();
        queue.notify_at("bad", ToastKind::Error, start);
        queue.notify_at("fine", ToastKind::Info, start);

        queue.prune(start + Duration::from_secs(6));
        assert!(queue.get(ToastKind::Info).is_none());
        assert!(queue.get(ToastKind::Error).is_some());

        queue.prune(start + Duration::from_millis(10_300));
        assert!(queue.is_empty());
    }
}
