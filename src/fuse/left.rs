//! `leftFuse`: attach a [`Transformer`] to the output side of a
//! [`Producer`], and its buffered counterpart.

use crate::buffered::BufferedProducer;
use crate::producer::{Producer, PullResult};
use crate::transformer::{HaveMore, TResult, Transformer};

enum FLState<P, T>
where
    P: Producer,
    T: Transformer<Item = P::Item>,
{
    Closed,
    Open(P, T),
    HaveMore(P, HaveMore<T>),
    Draining(T::Drain),
}

/// The producer returned by [`left_fuse`].
pub struct LeftFuse<P, T>(FLState<P, T>)
where
    P: Producer,
    T: Transformer<Item = P::Item>;

/// Attach `transformer` to the output side of `producer`.
///
/// Every pull of the result drives `producer` through `transformer`
/// until exactly one `B` is produced or both have been exhausted. Once
/// `producer` closes, `transformer`'s drain becomes the tail: the fused
/// producer's identity switches to the drain and keeps yielding its
/// output until that, too, is exhausted.
pub fn left_fuse<P, T>(producer: P, transformer: T) -> LeftFuse<P, T>
where
    P: Producer,
    T: Transformer<Item = P::Item>,
{
    LeftFuse(FLState::Open(producer, transformer))
}

impl<P, T> Producer for LeftFuse<P, T>
where
    P: Producer,
    T: Transformer<Item = P::Item>,
{
    type Item = T::Out;

    fn pull(self) -> PullResult<Self> {
        let mut state = self.0;
        loop {
            state = match state {
                FLState::Closed => return PullResult::Closed,
                FLState::HaveMore(p, have_more) => match have_more.pull() {
                    TResult::Running(t) => FLState::Open(p, t),
                    TResult::Finished(_leftover) => {
                        p.close();
                        return PullResult::Closed;
                    }
                    TResult::HaveMore(more, out) => return PullResult::Open(LeftFuse(FLState::HaveMore(p, more)), out),
                },
                FLState::Open(p, t) => match p.pull() {
                    PullResult::Closed => FLState::Draining(t.close()),
                    PullResult::Open(p, item) => match t.push(item) {
                        TResult::Running(t) => FLState::Open(p, t),
                        TResult::Finished(_leftover) => {
                            p.close();
                            return PullResult::Closed;
                        }
                        TResult::HaveMore(more, out) => return PullResult::Open(LeftFuse(FLState::HaveMore(p, more)), out),
                    },
                },
                FLState::Draining(drain) => match drain.pull() {
                    PullResult::Closed => return PullResult::Closed,
                    PullResult::Open(drain, out) => return PullResult::Open(LeftFuse(FLState::Draining(drain)), out),
                },
            };
        }
    }

    fn close(self) {
        match self.0 {
            FLState::Closed => {}
            FLState::Open(p, t) => {
                t.close().close();
                p.close();
            }
            FLState::HaveMore(p, have_more) => {
                have_more.close();
                p.close();
            }
            FLState::Draining(drain) => drain.close(),
        }
    }
}

enum FLBState<P, T>
where
    P: Producer,
    T: Transformer<Item = P::Item>,
{
    Closed,
    Open(BufferedProducer<P>, T),
    HaveMore(BufferedProducer<P>, HaveMore<T>),
    Draining(T::Drain),
}

/// The producer returned by [`left_fuse_buffered`].
///
/// Its [`Producer::close`] is a no-op: the buffered producer outlives
/// this fused view and is closed by whoever owns the
/// [`BufferedProducer`] handle, via [`BufferedProducer::close_buffered`].
pub struct LeftFuseBuffered<P, T>(FLBState<P, T>)
where
    P: Producer,
    T: Transformer<Item = P::Item>;

/// Attach `transformer` to the output side of a [`BufferedProducer`].
///
/// Identical to [`left_fuse`] except pulls go through
/// [`BufferedProducer::pull_buffered`], a [`TResult::Finished`] leftover
/// is pushed back with [`BufferedProducer::unpull`] instead of
/// discarded, and the returned producer's `close` does nothing (the
/// buffer is closed separately by its owner).
pub fn left_fuse_buffered<P, T>(producer: BufferedProducer<P>, transformer: T) -> LeftFuseBuffered<P, T>
where
    P: Producer,
    T: Transformer<Item = P::Item>,
{
    LeftFuseBuffered(FLBState::Open(producer, transformer))
}

impl<P, T> Producer for LeftFuseBuffered<P, T>
where
    P: Producer,
    T: Transformer<Item = P::Item>,
{
    type Item = T::Out;

    fn pull(self) -> PullResult<Self> {
        let mut state = self.0;
        loop {
            state = match state {
                FLBState::Closed => return PullResult::Closed,
                FLBState::HaveMore(buf, have_more) => match have_more.pull() {
                    TResult::Running(t) => FLBState::Open(buf, t),
                    TResult::Finished(leftover) => {
                        buf.unpull(leftover);
                        return PullResult::Closed;
                    }
                    TResult::HaveMore(more, out) => {
                        return PullResult::Open(LeftFuseBuffered(FLBState::HaveMore(buf, more)), out)
                    }
                },
                FLBState::Open(buf, t) => match buf.pull_buffered() {
                    None => FLBState::Draining(t.close()),
                    Some(item) => match t.push(item) {
                        TResult::Running(t) => FLBState::Open(buf, t),
                        TResult::Finished(leftover) => {
                            buf.unpull(leftover);
                            return PullResult::Closed;
                        }
                        TResult::HaveMore(more, out) => {
                            return PullResult::Open(LeftFuseBuffered(FLBState::HaveMore(buf, more)), out)
                        }
                    },
                },
                FLBState::Draining(drain) => match drain.pull() {
                    PullResult::Closed => return PullResult::Closed,
                    PullResult::Open(drain, out) => return PullResult::Open(LeftFuseBuffered(FLBState::Draining(drain)), out),
                },
            };
        }
    }

    fn close(self) {
        // Intentional no-op: the underlying BufferedProducer is owned
        // and closed independently of this view. See the open question
        // recorded in DESIGN.md for why a mid-drain/mid-burst close here
        // does not also release the transformer's burst state.
    }
}
