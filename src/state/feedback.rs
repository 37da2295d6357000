/// Copy-to-clipboard feedback
///
/// A successful copy flips the triggering button to a confirmation label
/// and raises a toast; both revert after the feedback duration. Every
/// confirmation and every toast gets its own token, and a revert only
/// applies while its token is still current. Copies on different buttons
/// therefore never cancel each other, and a repeated copy on the same
/// button extends its confirmation instead of being cut short.
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

/// Which text a copy button copies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CopyField {
    Title,
    Prompt,
}

impl CopyField {
    pub fn idle_label(self) -> &'static str {
        match self {
            CopyField::Title => "📋 Salin Judul",
            CopyField::Prompt => "📋 Salin Prompt",
        }
    }

    pub fn confirmed_label(self) -> &'static str {
        "✓ Tersalin!"
    }

    fn success_message(self) -> &'static str {
        match self {
            CopyField::Title => "Judul tersalin!",
            CopyField::Prompt => "Prompt tersalin!",
        }
    }
}

/// A copy button: snapshot index plus field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CopyTarget {
    pub item: usize,
    pub field: CopyField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub icon: &'static str,
    pub message: &'static str,
    pub kind: ToastKind,
}

/// Tokens to hand to the revert timers after a successful copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    pub button: u64,
    pub toast: u64,
}

#[derive(Debug, Clone)]
pub struct Feedback {
    duration: Duration,
    confirmed: HashMap<CopyTarget, u64>,
    toast: Option<(Toast, u64)>,
    next_token: u64,
}

impl Feedback {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            confirmed: HashMap::new(),
            toast: None,
            next_token: 0,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    fn token(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }

    /// Record a successful copy on `target`
    pub fn confirm(&mut self, target: CopyTarget) -> Confirmation {
        let button = self.token();
        self.confirmed.insert(target, button);
        let toast = self.copied(target.field);
        Confirmation { button, toast }
    }

    /// Raise the success toast without touching any button
    pub fn copied(&mut self, field: CopyField) -> u64 {
        self.show_toast(Toast {
            icon: "✓",
            message: field.success_message(),
            kind: ToastKind::Success,
        })
    }

    /// Record a failed copy. The button is left alone.
    pub fn fail(&mut self) -> u64 {
        self.show_toast(Toast {
            icon: "✗",
            message: "Gagal menyalin!",
            kind: ToastKind::Failure,
        })
    }

    fn show_toast(&mut self, toast: Toast) -> u64 {
        let token = self.token();
        self.toast = Some((toast, token));
        token
    }

    pub fn is_confirmed(&self, target: &CopyTarget) -> bool {
        self.confirmed.contains_key(target)
    }

    pub fn label(&self, target: &CopyTarget) -> &'static str {
        if self.is_confirmed(target) {
            target.field.confirmed_label()
        } else {
            target.field.idle_label()
        }
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref().map(|(toast, _)| toast)
    }

    /// Revert a button if `token` is still its latest confirmation
    pub fn expire_button(&mut self, target: &CopyTarget, token: u64) -> bool {
        if self.confirmed.get(target) == Some(&token) {
            self.confirmed.remove(target);
            return true;
        }
        false
    }

    /// Dismiss the toast if `token` is still the one showing
    pub fn expire_toast(&mut self, token: u64) -> bool {
        if matches!(self.toast, Some((_, current)) if current == token) {
            self.toast = None;
            return true;
        }
        false
    }

    /// Drop button confirmations; their cards were re-rendered
    pub fn clear_buttons(&mut self) {
        self.confirmed.clear();
    }

    pub fn clear(&mut self) {
        self.confirmed.clear();
        self.toast = None;
    }
}

/// Resolve to `value` once `duration` has passed.
/// The deadline is fixed when this is called, not when first polled.
pub fn elapse<T>(duration: Duration, value: T) -> impl Future<Output = T> {
    let deadline = tokio::time::Instant::now() + duration;
    async move {
        tokio::time::sleep_until(deadline).await;
        value
    }
}
