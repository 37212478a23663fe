/// Classification for retry policy.
///
/// Used by callers to decide whether a failed fetch is worth offering
/// to the user again.
///
/// | Class | Retry? |
/// |-------|--------|
/// | `Never` | No, the source answered but the answer is unusable |
/// | `WithBackoff` | Yes, after waiting (rate limits, timeouts) |
/// | `Immediate` | Yes, right away (connection hiccups, 5xx) |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// The request is fundamentally invalid or the payload is garbage.
    Never,

    /// Transient throttling or timeout. Retry after a delay.
    WithBackoff,

    /// Transient transport or server failure. Retrying now may succeed.
    Immediate,
}

impl RetryClass {
    pub fn is_retryable(self) -> bool {
        !matches!(self, RetryClass::Never)
    }
}
