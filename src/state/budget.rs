use std::sync::atomic::{AtomicUsize, Ordering};

/// Global page counter shared by all branches of one crawl
///
/// The count only ever grows and never passes `max`. Slots are handed out
/// by [`PageBudget::try_acquire`]; once the last slot is taken the budget
/// is exhausted and no further document may be counted or persisted.
#[derive(Debug)]
pub struct PageBudget {
    count: AtomicUsize,
    max: usize,
}

impl PageBudget {
    /// Creates a budget allowing `max` documents
    pub fn new(max: usize) -> Self {
        Self {
            count: AtomicUsize::new(0),
            max,
        }
    }

    /// Atomically takes the next page slot
    ///
    /// # Returns
    ///
    /// * `Some(n)` - The caller owns slot `n` (1-based); `n == max` means the
    ///   caller just exhausted the budget
    /// * `None` - The budget was already exhausted
    pub fn try_acquire(&self) -> Option<usize> {
        self.count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |count| {
                (count < self.max).then_some(count + 1)
            })
            .ok()
            .map(|previous| previous + 1)
    }

    /// Returns true once every slot has been taken
    pub fn is_exhausted(&self) -> bool {
        self.count() >= self.max
    }

    /// Number of slots taken so far
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }

    /// Configured maximum
    pub fn max(&self) -> usize {
        self.max
    }
}
