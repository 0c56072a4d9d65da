//! Deferred actions keyed to the simulation clock.
//!
//! A table of `(deadline, token, action)` entries. The owner drains due
//! entries once per tick; cancelling removes the entry outright, so a
//! cancelled action can never fire later.

/// Handle for cancelling a scheduled action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CancelToken(u64);

#[derive(Debug, Clone)]
struct Entry<A> {
    deadline: f32,
    token: CancelToken,
    action: A,
}

#[derive(Debug, Clone)]
pub struct DeferredActions<A> {
    entries: Vec<Entry<A>>,
    next_token: u64,
}

impl<A> Default for DeferredActions<A> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_token: 0,
        }
    }
}

impl<A> DeferredActions<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` once the clock reaches `deadline`.
    pub fn schedule(&mut self, deadline: f32, action: A) -> CancelToken {
        let token = CancelToken(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        self.entries.push(Entry {
            deadline,
            token,
            action,
        });
        token
    }

    /// Remove a pending action. Returns it if it was still pending.
    pub fn cancel(&mut self, token: CancelToken) -> Option<A> {
        let index = self.entries.iter().position(|entry| entry.token == token)?;
        Some(self.entries.remove(index).action)
    }

    /// Remove every pending action. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    /// Take every action with `deadline <= now`, earliest first.
    ///
    /// Entries with equal deadlines keep scheduling order.
    pub fn drain_due(&mut self, now: f32) -> Vec<(CancelToken, A)> {
        let mut due = Vec::new();
        let mut index = 0;
        while index < self.entries.len() {
            if self.entries[index].deadline <= now {
                due.push(self.entries.remove(index));
            } else {
                index += 1;
            }
        }
        due.sort_by(|a, b| a.deadline.total_cmp(&b.deadline));
        due.into_iter().map(|entry| (entry.token, entry.action)).collect()
    }
}
