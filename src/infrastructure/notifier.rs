use crate::domain::ports::{Notifier, Toast, ToastVariant};
use std::sync::{Arc, RwLock};

/// Renders toasts as log events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.variant {
            ToastVariant::Default => {
                tracing::info!(title = %toast.title, "{}", toast.description)
            }
            ToastVariant::Destructive => {
                tracing::warn!(title = %toast.title, "{}", toast.description)
            }
        }
    }
}

/// Keeps every toast in memory.
///
/// Clones share the same buffer, so a test can hand one clone to the wizard
/// and inspect the other.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    toasts: Arc<RwLock<Vec<Toast>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        match self.toasts.read() {
            Ok(toasts) => toasts.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn titles(&self) -> Vec<String> {
        self.toasts().into_iter().map(|t| t.title).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        match self.toasts.write() {
            Ok(mut toasts) => toasts.push(toast),
            Err(poisoned) => poisoned.into_inner().push(toast),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::NotifierBox;

    #[test]
    fn test_recording_notifier_shares_buffer() {
        let recorder = RecordingNotifier::new();
        let boxed: NotifierBox = Box::new(recorder.clone());

        boxed.notify(Toast::info("Processing Payment", "Connecting..."));
        boxed.notify(Toast::destructive("Payment Failed", "Declined"));

        let toasts = recorder.toasts();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[1].variant, ToastVariant::Destructive);
        assert_eq!(recorder.titles(), vec!["Processing Payment", "Payment Failed"]);
    }
}
