/// Transient status messages
///
/// At most one toast is on screen. It stays visible for the display duration,
/// fades, then disappears. The notifier never sleeps; callers pass the current
/// instant and receive the view patches to apply.
use std::time::{Duration, Instant};

use crate::view::ViewPatch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Icon identifier the host renders next to the message
    pub fn icon(self) -> &'static str {
        match self {
            Severity::Success => "check-circle",
            Severity::Error => "exclamation-circle",
            Severity::Warning => "exclamation-triangle",
            Severity::Info => "info-circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
}

impl Toast {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTiming {
    pub display: Duration,
    pub fade: Duration,
}

impl Default for ToastTiming {
    fn default() -> Self {
        Self {
            display: Duration::from_millis(3000),
            fade: Duration::from_millis(300),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Visible,
    Fading,
}

#[derive(Debug, Clone)]
struct ActiveToast {
    toast: Toast,
    shown_at: Instant,
    phase: Phase,
}

#[derive(Debug, Clone, Default)]
pub struct Notifier {
    timing: ToastTiming,
    current: Option<ActiveToast>,
}

impl Notifier {
    pub fn new(timing: ToastTiming) -> Self {
        Self {
            timing,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref().map(|active| &active.toast)
    }

    pub fn is_fading(&self) -> bool {
        matches!(
            self.current,
            Some(ActiveToast {
                phase: Phase::Fading,
                ..
            })
        )
    }

    /// Show `toast`, replacing whatever is on screen
    pub fn notify(&mut self, toast: Toast, now: Instant) -> Vec<ViewPatch> {
        let mut patches = Vec::with_capacity(2);
        if self.current.take().is_some() {
            patches.push(ViewPatch::DismissToast);
        }

        tracing::debug!("Toast [{:?}]: {}", toast.severity, toast.message);
        patches.push(ViewPatch::ShowToast(toast.clone()));
        self.current = Some(ActiveToast {
            toast,
            shown_at: now,
            phase: Phase::Visible,
        });
        patches
    }

    /// Advance the toast lifecycle to `now`
    pub fn tick(&mut self, now: Instant) -> Option<ViewPatch> {
        let active = self.current.as_mut()?;
        let elapsed = now.saturating_duration_since(active.shown_at);

        if elapsed >= self.timing.display + self.timing.fade {
            self.current = None;
            return Some(ViewPatch::DismissToast);
        }

        if elapsed >= self.timing.display && active.phase == Phase::Visible {
            active.phase = Phase::Fading;
            return Some(ViewPatch::FadeToast);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_icons() {
        assert_eq!(Severity::Success.icon(), "check-circle");
        assert_eq!(Severity::Warning.icon(), "exclamation-triangle");
    }

    #[test]
    fn test_new_toast_replaces_current() {
        let mut notifier = Notifier::default();
        let now = Instant::now();

        let first = notifier.notify(Toast::new("one", Severity::Info), now);
        assert_eq!(first.len(), 1);

        let second = notifier.notify(Toast::new("two", Severity::Warning), now);
        assert_eq!(second[0], ViewPatch::DismissToast);
        assert_eq!(
            second[1],
            ViewPatch::ShowToast(Toast::new("two", Severity::Warning))
        );
        assert_eq!(notifier.current().unwrap().message, "two");
    }

    #[test]
    fn test_toast_lifecycle() {
        let mut notifier = Notifier::default();
        let start = Instant::now();
        notifier.notify(Toast::new("saved", Severity::Success), start);

        assert_eq!(notifier.tick(start + Duration::from_millis(2999)), None);
        assert_eq!(
            notifier.tick(start + Duration::from_millis(3000)),
            Some(ViewPatch::FadeToast)
        );
        assert!(notifier.is_fading());
        assert_eq!(notifier.tick(start + Duration::from_millis(3100)), None);
        assert_eq!(
            notifier.tick(start + Duration::from_millis(3300)),
            Some(ViewPatch::DismissToast)
        );
        assert!(notifier.current().is_none());
        assert_eq!(notifier.tick(start + Duration::from_secs(10)), None);
    }

    #[test]
    fn test_late_tick_dismisses_directly() {
        let mut notifier = Notifier::default();
        let start = Instant::now();
        notifier.notify(Toast::new("saved", Severity::Success), start);

        assert_eq!(
            notifier.tick(start + Duration::from_secs(5)),
            Some(ViewPatch::DismissToast)
        );
    }
}
