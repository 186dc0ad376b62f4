//! Freshness bookkeeping for concurrent catalog fetches.
//!
//! # Design
//! - Every request is tagged with a [`Ticket`] from one monotonically
//!   increasing counter; only the latest ticket of a [`Stream`] may be applied.
//! - Invalidating a stream makes every in-flight request for it stale without
//!   issuing a new one (used while a search edit is still debouncing).
//! - The debounce timer itself lives in the driver; the coordinator only hands
//!   out [`SearchToken`]s and remembers which one is still pending.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::PartitionKind;

/// Logical request stream whose responses supersede each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stream {
    /// Listing of one partition.
    Partition(PartitionKind),
    /// Storage statistics.
    Stats,
    /// Known users.
    Users,
    /// Detail of the current item.
    Detail,
}

/// Sequence number attached to one request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Handle of one scheduled (debounced) search fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchToken(u64);

/// Issues tickets and decides which responses are still authoritative.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FetchCoordinator {
    next_ticket: u64,
    latest: BTreeMap<Stream, Ticket>,
    awaiting: BTreeSet<Stream>,
    next_search: u64,
    pending_search: Option<SearchToken>,
}

impl FetchCoordinator {
    /// Issue a ticket for `stream`, superseding any request already in flight.
    pub fn issue(&mut self, stream: Stream) -> Ticket {
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        self.latest.insert(stream, ticket);
        self.awaiting.insert(stream);
        ticket
    }

    /// Make every in-flight request of `stream` stale.
    pub fn invalidate(&mut self, stream: Stream) {
        self.latest.remove(&stream);
        self.awaiting.remove(&stream);
    }

    /// Whether `ticket` is the latest one issued for `stream`.
    #[must_use]
    pub fn is_current(&self, stream: Stream, ticket: Ticket) -> bool {
        self.latest.get(&stream) == Some(&ticket)
    }

    /// Mark the response for `ticket` as arrived.
    ///
    /// Returns `true` when the response is authoritative and should be applied,
    /// `false` when it was superseded and must be discarded.
    pub fn settle(&mut self, stream: Stream, ticket: Ticket) -> bool {
        if !self.is_current(stream, ticket) {
            return false;
        }
        self.awaiting.remove(&stream);
        true
    }

    /// Whether any authoritative request is still outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        !self.awaiting.is_empty() || self.pending_search.is_some()
    }

    /// Whether a request for `stream` is outstanding.
    #[must_use]
    pub fn is_awaiting(&self, stream: Stream) -> bool {
        self.awaiting.contains(&stream)
    }

    /// Schedule a debounced search, replacing any pending one.
    pub fn schedule_search(&mut self) -> SearchToken {
        self.next_search += 1;
        let token = SearchToken(self.next_search);
        self.pending_search = Some(token);
        token
    }

    /// Consume a fired search timer. Returns `false` for timers that were
    /// rescheduled or cancelled after they were armed.
    pub fn take_search(&mut self, token: SearchToken) -> bool {
        if self.pending_search == Some(token) {
            self.pending_search = None;
            true
        } else {
            false
        }
    }

    /// Drop the pending search, if any.
    pub fn cancel_search(&mut self) {
        self.pending_search = None;
    }

    /// Token of the search still waiting for its quiet period.
    #[must_use]
    pub const fn pending_search(&self) -> Option<SearchToken> {
        self.pending_search
    }
}
