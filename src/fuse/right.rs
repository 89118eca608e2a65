//! `rightFuse`: attach a [`Transformer`] to the input side of a
//! [`Consumer`].

use alloc::boxed::Box;

use crate::connect::connect;
use crate::consumer::{Active, Consumer, Push};
use crate::transformer::{HaveMore, TResult, Transformer};

/// Attach `transformer` to the input side of `consumer`, producing a
/// consumer of `transformer`'s input type that yields `consumer`'s result
/// type.
///
/// - [`Consumer::NoData`]: the transformer's drain still needs closing
///   (it may be holding resources) even though no data will flow, so the
///   result is a [`Consumer::Suspend`] whose thunk closes the drain and
///   then returns `NoData` unchanged.
/// - [`Consumer::Suspend`]: the thunk is deferred one level further, with
///   `right_fuse` reapplied to whatever consumer it produces.
/// - [`Consumer::Active`]: pushes thread through `transformer` first; any
///   `B` it produces (including whole `HaveMore` bursts) is pushed on
///   into the inner consumer before `transformer` is asked for another
///   input.
pub fn right_fuse<T, COut>(transformer: T, consumer: Consumer<T::Out, COut>) -> Consumer<T::Item, COut>
where
    T: Transformer + 'static,
    COut: 'static,
{
    match consumer {
        Consumer::NoData(c) => Consumer::suspend(move || {
            transformer.close().close();
            Consumer::NoData(c)
        }),
        Consumer::Suspend(thunk) => Consumer::suspend(move || right_fuse(transformer, thunk())),
        Consumer::Active(inner) => Consumer::active(RightFuseActive { transformer, inner }),
    }
}

struct RightFuseActive<T: Transformer, COut> {
    transformer: T,
    inner: Box<dyn Active<Item = T::Out, Output = COut>>,
}

impl<T, COut> Active for RightFuseActive<T, COut>
where
    T: Transformer + 'static,
    COut: 'static,
{
    type Item = T::Item;
    type Output = COut;

    fn push(self: Box<Self>, item: T::Item) -> Push<T::Item, COut> {
        let RightFuseActive { transformer, inner } = *self;
        match transformer.push(item) {
            TResult::Running(transformer) => Push::Running(Box::new(RightFuseActive { transformer, inner })),
            TResult::Finished(leftover) => Push::Done(leftover, inner.close()),
            TResult::HaveMore(more, b) => drain_burst(more, b, inner),
        }
    }

    fn close(self: Box<Self>) -> COut {
        let RightFuseActive { transformer, inner } = *self;
        connect(transformer.close(), Consumer::Active(inner))
    }
}

/// Feed one burst output `b` into `inner`, then keep pulling `more` for
/// as long as `inner` stays `Running` and `more` keeps producing. A
/// single push may legitimately emit a multi-element burst, and every
/// element of it must reach the inner consumer before `transformer` is
/// asked for new input.
fn drain_burst<T, COut>(mut more: HaveMore<T>, mut b: T::Out, mut inner: Box<dyn Active<Item = T::Out, Output = COut>>) -> Push<T::Item, COut>
where
    T: Transformer + 'static,
    COut: 'static,
{
    loop {
        match inner.push(b) {
            Push::Done(_inner_leftover, c) => {
                // The inner leftover is of the burst's item type (T::Out),
                // not transformer's input type (T::Item) — it cannot be
                // returned at this boundary, so it is dropped here.
                more.close();
                return Push::Done(None, c);
            }
            Push::Running(inner_next) => match more.pull() {
                TResult::Running(transformer) => return Push::Running(Box::new(RightFuseActive { transformer, inner: inner_next })),
                TResult::Finished(leftover) => return Push::Done(leftover, inner_next.close()),
                TResult::HaveMore(more_next, b_next) => {
                    more = more_next;
                    b = b_next;
                    inner = inner_next;
                }
            },
        }
    }
}
