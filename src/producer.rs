//! Pull-driven stream sources.
//!
//! A [`Producer`] is consumed by value on every pull: the old state is
//! moved in, a new state (or [`PullResult::Closed`]) is moved out. Each
//! pull threads a fresh continuation out of the old one by value, the
//! same way a buffer cursor threads a fresh slice out of `&mut self` —
//! except here the *whole* producer, not just a view into a buffer, is
//! the continuation.

/// The result of pulling one item from a [`Producer`].
///
/// `Open` carries both the produced item and the producer's continuation
/// — the only state that may be pulled or closed next. The original
/// producer is gone; it was consumed by [`Producer::pull`].
pub enum PullResult<P: Producer> {
    /// End of stream. The producer has already finalized itself; it must
    /// not be closed.
    Closed,
    /// One item, plus the continuation to pull (or close) next.
    Open(P, P::Item),
}

/// A pull-driven source of `Item` values.
///
/// # Invariants
///
/// - Once [`Producer::pull`] returns [`PullResult::Closed`], the producer
///   behind it is gone (it was consumed by the call) and cannot be pulled
///   or closed again — this is enforced by Rust's ownership rules, not a
///   runtime check.
/// - Exactly one of "pull to `Closed`" or "explicit `close`" finalizes a
///   given producer value. Calling both is impossible: both consume
///   `self` by value.
pub trait Producer: Sized {
    /// The type of items this producer yields.
    type Item;

    /// Pull the next item, consuming this producer and yielding its
    /// continuation alongside the item, or [`PullResult::Closed`] if the
    /// stream has ended.
    fn pull(self) -> PullResult<Self>;

    /// Release any resources held by this producer without pulling it to
    /// completion first.
    fn close(self);
}

/// Every [`PullResult`] decomposes either into `Closed` or an
/// `(item, continuation)` pair; [`PullResult::into_parts`] is the
/// ergonomic way to match on that without naming the enum at every call
/// site.
impl<P: Producer> PullResult<P> {
    /// Decompose into `Some((item, next))` or `None` for `Closed`.
    #[inline]
    pub fn into_parts(self) -> Option<(P::Item, P)> {
        match self {
            PullResult::Closed => None,
            PullResult::Open(next, item) => Some((item, next)),
        }
    }

    /// True if this is [`PullResult::Closed`].
    #[inline]
    pub fn is_closed(&self) -> bool {
        matches!(self, PullResult::Closed)
    }
}
