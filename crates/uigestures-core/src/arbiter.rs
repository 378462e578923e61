//! Delegate policy consulted by recognizers right before they recognize.

use crate::recognizer::{GestureRecognizer, RecognizerCore};

/// Host hooks deciding which recognizers may track a touch sequence.
///
/// Every method defaults to `true`, so an empty implementation lets all
/// recognizers work independently.
pub trait DelegateCallback {
    /// Asked when `recognizer` is about to leave `Possible`. Returning false
    /// fails it.
    fn should_begin(&self, recognizer: &RecognizerCore) -> bool {
        let _ = recognizer;
        true
    }

    /// Asked on every `Down`; a recognizer that is refused sees nothing of
    /// the sequence that follows.
    fn should_receive_touch(&self, recognizer: &RecognizerCore) -> bool {
        let _ = recognizer;
        true
    }

    /// Asked for each other recognizer that is already recognizing when
    /// `recognizer` is about to leave `Possible`.
    fn should_recognize_simultaneously(
        &self,
        recognizer: &RecognizerCore,
        other: &RecognizerCore,
    ) -> bool {
        let _ = (recognizer, other);
        true
    }
}

/// A recognizer's view of its siblings during one dispatch.
///
/// The dispatched recognizer is split out of the delegate's list, so the
/// arbiter only borrows the recognizers before and after it.
pub(crate) struct Arbiter<'a> {
    callback: Option<&'a dyn DelegateCallback>,
    before: &'a [GestureRecognizer],
    after: &'a [GestureRecognizer],
}

impl<'a> Arbiter<'a> {
    pub(crate) fn new(
        callback: Option<&'a dyn DelegateCallback>,
        before: &'a [GestureRecognizer],
        after: &'a [GestureRecognizer],
    ) -> Self {
        Self {
            callback,
            before,
            after,
        }
    }

    /// No siblings and no callback: every request is granted.
    #[cfg(test)]
    pub(crate) fn detached() -> Arbiter<'static> {
        Arbiter {
            callback: None,
            before: &[],
            after: &[],
        }
    }

    pub(crate) fn should_begin(&self, recognizer: &RecognizerCore) -> bool {
        self.callback
            .map_or(true, |callback| callback.should_begin(recognizer))
    }

    pub(crate) fn should_recognize_simultaneously(&self, recognizer: &RecognizerCore) -> bool {
        let Some(callback) = self.callback else {
            return true;
        };
        self.before
            .iter()
            .chain(self.after)
            .map(GestureRecognizer::core)
            .filter(|other| other.enabled && other.began_firing && other.state.is_active())
            .all(|other| callback.should_recognize_simultaneously(recognizer, other))
    }
}
