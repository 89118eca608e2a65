//! A mutable wrapper that makes a non-restartable [`Producer`] resumable
//! across multiple [`connect_buffered`] calls, with a one-slot pushback.
//!
//! This is the one piece of the crate with interior mutability: a single
//! shared cell, owned by its creator, accessed only through the
//! documented operations below. It is not `Sync` — concurrent use from
//! more than one thread is undefined behavior, not a recoverable error
//! (see the crate-level docs).

use alloc::rc::Rc;
use core::cell::RefCell;

use crate::consumer::{Consumer, Push};
use crate::producer::{Producer, PullResult};

enum BufState<P: Producer> {
    OpenEmpty(P),
    OpenFull(P, P::Item),
    ClosedEmpty,
    ClosedFull(P::Item),
    /// Only ever observed transiently, while a method below is mid-way
    /// through moving the old state out and the new state in. Seeing it
    /// from the outside means two calls into the same [`BufferedProducer`]
    /// overlapped, which is only possible by calling back into it from
    /// inside the underlying producer's own `pull`/`close` — a reentrancy
    /// bug in caller code, not something this crate can recover from.
    Transitioning,
}

/// A resumable, pushback-capable wrapper over a [`Producer`].
///
/// Cloning a `BufferedProducer` clones the handle, not the state: all
/// clones share the same underlying cell, matching the "shared cell
/// owned by its creator" design note. [`connect_buffered`] and
/// [`crate::fuse::left_fuse_buffered`] both take a `&BufferedProducer`
/// (or a clone) precisely so that the owner retains a handle to call
/// [`BufferedProducer::close_buffered`] once the pipeline built on top of
/// it is done.
pub struct BufferedProducer<P: Producer>(Rc<RefCell<BufState<P>>>);

impl<P: Producer> Clone for BufferedProducer<P> {
    #[inline]
    fn clone(&self) -> Self {
        BufferedProducer(Rc::clone(&self.0))
    }
}

impl<P: Producer> BufferedProducer<P> {
    /// Wrap `producer`, starting in the `OpenEmpty` state.
    #[inline]
    pub fn new(producer: P) -> Self {
        BufferedProducer(Rc::new(RefCell::new(BufState::OpenEmpty(producer))))
    }

    /// Pull the next item, or `None` if the underlying producer (or a
    /// previously buffered end-of-stream) is exhausted.
    ///
    /// Unlike [`Producer::pull`], this never consumes `self` — the whole
    /// point of a `BufferedProducer` is that it survives past a single
    /// pull.
    pub fn pull_buffered(&self) -> Option<P::Item> {
        match self.0.replace(BufState::Transitioning) {
            BufState::OpenEmpty(p) => match p.pull() {
                PullResult::Closed => {
                    *self.0.borrow_mut() = BufState::ClosedEmpty;
                    None
                }
                PullResult::Open(next, item) => {
                    *self.0.borrow_mut() = BufState::OpenEmpty(next);
                    Some(item)
                }
            },
            BufState::OpenFull(p, item) => {
                *self.0.borrow_mut() = BufState::OpenEmpty(p);
                Some(item)
            }
            BufState::ClosedEmpty => {
                *self.0.borrow_mut() = BufState::ClosedEmpty;
                None
            }
            BufState::ClosedFull(item) => {
                *self.0.borrow_mut() = BufState::ClosedEmpty;
                Some(item)
            }
            BufState::Transitioning => panic_reentrant(),
        }
    }

    /// Push an item back into the one-slot buffer.
    ///
    /// `None` is a no-op. Pushing `Some` onto a slot that already holds
    /// an element is an invariant violation (at most one element of
    /// pushback is ever supported) and panics.
    #[track_caller]
    pub fn unpull(&self, item: Option<P::Item>) {
        let Some(item) = item else { return };
        match self.0.replace(BufState::Transitioning) {
            BufState::OpenEmpty(p) => *self.0.borrow_mut() = BufState::OpenFull(p, item),
            BufState::ClosedEmpty => *self.0.borrow_mut() = BufState::ClosedFull(item),
            full @ (BufState::OpenFull(..) | BufState::ClosedFull(_)) => {
                *self.0.borrow_mut() = full;
                panic_unpull_onto_full();
            }
            BufState::Transitioning => panic_reentrant(),
        }
    }

    /// Close the underlying producer if it is still live, moving to the
    /// corresponding closed state. Idempotent: closing an already-closed
    /// `BufferedProducer` is a no-op. A pending pushback survives closing
    /// from an `OpenFull` state — only the underlying producer goes away;
    /// the buffered element is still readable via one more
    /// [`BufferedProducer::pull_buffered`], same as it would be from
    /// `ClosedFull` reached any other way.
    pub fn close_buffered(&self) {
        match self.0.replace(BufState::Transitioning) {
            BufState::OpenEmpty(p) => {
                p.close();
                *self.0.borrow_mut() = BufState::ClosedEmpty;
            }
            BufState::OpenFull(p, item) => {
                p.close();
                *self.0.borrow_mut() = BufState::ClosedFull(item);
            }
            closed @ (BufState::ClosedEmpty | BufState::ClosedFull(_)) => {
                *self.0.borrow_mut() = closed;
            }
            BufState::Transitioning => panic_reentrant(),
        }
        debug_assert!(matches!(*self.0.borrow(), BufState::ClosedEmpty | BufState::ClosedFull(_)));
    }

    /// Convert into a plain, one-shot [`Producer`], reading the buffer
    /// state exactly once. There is no going back: further
    /// [`BufferedProducer::pull_buffered`]/[`BufferedProducer::unpull`]
    /// calls on this (or any cloned) handle will observe the buffer as
    /// drained (`ClosedEmpty`), since the underlying producer's
    /// ownership has moved into the returned [`Unbuffered`] value.
    ///
    /// If a pushed-back element was present, it is yielded first by the
    /// returned producer; the underlying producer (if still live)
    /// follows. If the underlying producer was already closed, the
    /// returned producer yields the pending element (if any) and then
    /// closes.
    pub fn unbuffer(self) -> Unbuffered<P> {
        match self.0.replace(BufState::ClosedEmpty) {
            BufState::OpenEmpty(p) => Unbuffered(UnbufferedState::Live(p)),
            BufState::OpenFull(p, item) => Unbuffered(UnbufferedState::Pushback(item, Some(p))),
            BufState::ClosedEmpty => Unbuffered(UnbufferedState::Closed),
            BufState::ClosedFull(item) => Unbuffered(UnbufferedState::Pushback(item, None)),
            BufState::Transitioning => panic_reentrant(),
        }
    }
}

/// The plain producer returned by [`BufferedProducer::unbuffer`].
pub struct Unbuffered<P: Producer>(UnbufferedState<P>);

enum UnbufferedState<P: Producer> {
    /// A pending pushback, followed by the live underlying producer if
    /// there is one (`None` means the underlying producer was already
    /// closed).
    Pushback(P::Item, Option<P>),
    Live(P),
    Closed,
}

impl<P: Producer> Producer for Unbuffered<P> {
    type Item = P::Item;

    fn pull(self) -> PullResult<Self> {
        match self.0 {
            UnbufferedState::Pushback(item, Some(p)) => PullResult::Open(Unbuffered(UnbufferedState::Live(p)), item),
            UnbufferedState::Pushback(item, None) => PullResult::Open(Unbuffered(UnbufferedState::Closed), item),
            UnbufferedState::Live(p) => match p.pull() {
                PullResult::Closed => PullResult::Closed,
                PullResult::Open(next, item) => PullResult::Open(Unbuffered(UnbufferedState::Live(next)), item),
            },
            UnbufferedState::Closed => PullResult::Closed,
        }
    }

    fn close(self) {
        match self.0 {
            UnbufferedState::Pushback(_, Some(p)) => p.close(),
            UnbufferedState::Pushback(_, None) | UnbufferedState::Closed => {}
            UnbufferedState::Live(p) => p.close(),
        }
    }
}

/// Drive `consumer` from a [`BufferedProducer`], writing back any
/// leftover instead of discarding it, and never closing the underlying
/// producer. Otherwise identical to [`connect`](crate::connect::connect).
pub fn connect_buffered<P: Producer, B>(buf: &BufferedProducer<P>, mut consumer: Consumer<P::Item, B>) -> B {
    loop {
        consumer = match consumer {
            Consumer::NoData(b) => return b,
            Consumer::Suspend(thunk) => thunk(),
            Consumer::Active(active) => match buf.pull_buffered() {
                None => return active.close(),
                Some(item) => match active.push(item) {
                    Push::Done(leftover, b) => {
                        buf.unpull(leftover);
                        return b;
                    }
                    Push::Running(active) => {
                        consumer = Consumer::Active(active);
                        continue;
                    }
                },
            },
        };
    }
}

#[inline(never)]
#[cold]
#[track_caller]
fn panic_unpull_onto_full() -> ! {
    panic!("BufferedProducer::unpull called on a slot that already holds an element")
}

#[inline(never)]
#[cold]
#[track_caller]
fn panic_reentrant() -> ! {
    panic!("BufferedProducer accessed reentrantly from within one of its own operations")
}
