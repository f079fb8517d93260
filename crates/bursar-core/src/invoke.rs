use crate::types::{Balance, Identity};

/// Result of one external invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvokeOutcome {
    /// Whether the target reported success. A failed outcome aborts the
    /// whole requesting operation.
    pub success: bool,
    /// Raw return payload from the target.
    pub return_data: Vec<u8>,
}

impl InvokeOutcome {
    pub fn ok(return_data: Vec<u8>) -> Self {
        Self {
            success: true,
            return_data,
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            return_data: Vec::new(),
        }
    }
}

/// Platform-provided atomic external-call-with-value mechanism.
///
/// The core treats this as opaque: it forwards `value` and `payload` to
/// `target` and requires the outcome to report success. The embedding
/// environment owns the target's state; this system only rolls back its own
/// on failure.
pub trait Invoker {
    fn invoke(&mut self, target: &Identity, value: Balance, payload: &[u8]) -> InvokeOutcome;
}
