//! Push-driven stream sinks.
//!
//! [`Consumer`] is the one sum type in this crate that is genuinely
//! heterogeneous: `NoData` holds a bare result, `Suspend` holds a
//! deferred computation, and `Active` holds a boxed state machine whose
//! concrete type varies with how the consumer was built (a leaf
//! consumer, or one produced by [`crate::fuse::right_fuse`]). That's why
//! `Active` is the one place in this crate that reaches for `dyn` rather
//! than a monomorphized continuation: `Producer` and `Transformer`
//! compositions keep a single concrete type threaded through their whole
//! lifetime and so stay unboxed, but two different `Consumer<A, B>`
//! values of the same `A`/`B` can legitimately be built from unrelated
//! concrete push/close implementations, and the type has to be nameable
//! without naming them.

use alloc::boxed::Box;

/// The result of pushing one item into an [`Active`] consumer.
pub enum Push<A, B> {
    /// The consumer is finished. Carries back the pushed item if the
    /// consumer never consumed it (at most one element of leftover).
    Done(Option<A>, B),
    /// Ready for another input.
    Running(Box<dyn Active<Item = A, Output = B>>),
}

/// The boxed, push-driven half of a [`Consumer`].
///
/// Implementations are one-shot: both methods consume `self` by value
/// (via `Box<Self>`, since this trait is used as a trait object).
pub trait Active {
    /// Input item type.
    type Item;
    /// Final result type.
    type Output;

    /// Feed one input item.
    fn push(self: Box<Self>, item: Self::Item) -> Push<Self::Item, Self::Output>;

    /// Finalize without further input.
    fn close(self: Box<Self>) -> Self::Output;
}

/// A push-driven sink of `Item` values producing a final `Output`.
///
/// # Invariants
///
/// - A consumer is used linearly: [`crate::connect::connect`] is the only
///   place that should drive one to completion, and it never calls
///   `push` or `close` again after either has returned a final value.
/// - Leftover reported by [`Push::Done`] is at most one element.
pub enum Consumer<A, B> {
    /// Already has its result; consumes nothing. A producer driven into
    /// this variant is never pulled or closed.
    NoData(B),
    /// A deferred consumer. The boxed thunk runs exactly once, when
    /// [`crate::connect::connect`] (or a fuse built on top of it) reaches
    /// this variant; its result replaces it.
    Suspend(Box<dyn FnOnce() -> Consumer<A, B>>),
    /// Ready to be pushed into.
    Active(Box<dyn Active<Item = A, Output = B>>),
}

impl<A, B> Consumer<A, B> {
    /// Build a [`Consumer::NoData`].
    #[inline]
    pub fn no_data(b: B) -> Self {
        Consumer::NoData(b)
    }

    /// Build a [`Consumer::Suspend`] from a deferred thunk.
    #[inline]
    pub fn suspend(thunk: impl FnOnce() -> Consumer<A, B> + 'static) -> Self {
        Consumer::Suspend(Box::new(thunk))
    }

    /// Build a [`Consumer::Active`] from a boxed state machine.
    #[inline]
    pub fn active(state: impl Active<Item = A, Output = B> + 'static) -> Self {
        Consumer::Active(Box::new(state))
    }
}
