//! Single-flight guard over an atomic flag

use std::sync::atomic::{AtomicBool, Ordering};

/// Holds `flag` raised for as long as it lives.
///
/// Dropping the guard lowers the flag, including when the owning future is
/// cancelled mid-await.
#[derive(Debug)]
pub(crate) struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlight<'a> {
    /// `None` if the flag is already raised.
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_until_release() {
        let flag = AtomicBool::new(false);

        let guard = InFlight::acquire(&flag);
        assert!(guard.is_some());
        assert!(InFlight::acquire(&flag).is_none());

        drop(guard);
        assert!(InFlight::acquire(&flag).is_some());
    }
}
