//! `midFuse`: compose two [`Transformer`]s into one.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

use super::left::{left_fuse, LeftFuse};
use crate::transformer::{HaveMore, TResult, Transformer};

/// Compose `t1` and `t2` into a single transformer from `t1`'s input type
/// to `t2`'s output type.
///
/// Structurally this is [`crate::fuse::right_fuse`] with `t2` standing in
/// for the downstream consumer, except `t2` is itself a transformer: it
/// has no final result to hand back on `Finished`, only a drain. Whenever
/// `t1` (directly, or via its pending burst continuation) reports
/// [`TResult::Finished`] while `t2` is still live, `t2`'s drain is run to
/// its own closure before the composed transformer reports `Finished` in
/// turn — `t2` is a distinct, still-open component the fuser owns, and
/// must be released even though `t1`'s own close is not assumed to be
/// owed in this case.
///
/// [`Transformer::close`] on the composed value is `left_fuse(t1.close(),
/// t2)`: `t1`'s drain, which is a `Producer`, is run through `t2` by
/// reusing `left_fuse` rather than hand-writing a third drain state
/// machine.
pub fn mid_fuse<T1, T2>(t1: T1, t2: T2) -> MidFuse<T1, T2>
where
    T1: Transformer + 'static,
    T2: Transformer<Item = T1::Out> + 'static,
{
    MidFuse { t1, t2 }
}

/// The transformer returned by [`mid_fuse`].
pub struct MidFuse<T1, T2>
where
    T1: Transformer,
    T2: Transformer<Item = T1::Out>,
{
    t1: T1,
    t2: T2,
}

impl<T1, T2> Transformer for MidFuse<T1, T2>
where
    T1: Transformer + 'static,
    T2: Transformer<Item = T1::Out> + 'static,
{
    type Item = T1::Item;
    type Out = T2::Out;
    type Drain = LeftFuse<T1::Drain, T2>;

    fn push(self, item: T1::Item) -> TResult<Self> {
        let MidFuse { t1, t2 } = self;
        match t1.push(item) {
            TResult::Running(t1) => TResult::Running(MidFuse { t1, t2 }),
            TResult::Finished(leftover) => finish_with_live_t2(leftover, t2),
            TResult::HaveMore(more, b) => drain_t2(b, more, t2),
        }
    }

    fn close(self) -> Self::Drain {
        left_fuse(self.t1.close(), self.t2)
    }
}

/// `t1` has reported `Finished` (directly, or from its pending burst
/// continuation) while `t2` is still a live, untouched component. `t2`
/// never got to see this as input, so its drain is run to closure here
/// before the composed transformer itself reports `Finished` — matching
/// `left_fuse`'s `FL_Open` close-path (`t.close().close()`) and
/// `right_fuse`'s `Finished` arm (`inner.close()`), which both finalize
/// the side that `t1`'s `Finished` left untouched.
fn finish_with_live_t2<T1, T2>(leftover: Option<T1::Item>, t2: T2) -> TResult<MidFuse<T1, T2>>
where
    T1: Transformer + 'static,
    T2: Transformer<Item = T1::Out> + 'static,
{
    t2.close().close();
    TResult::Finished(leftover)
}

/// Feed `b` (an output `t1` just produced) into `t2`, then decide what to
/// do based on how `t2` reacts, threading `more` (`t1`'s pending burst
/// continuation) through so `t1`'s own burst can continue once `t2` is
/// ready for the next input.
fn drain_t2<T1, T2>(b: T1::Out, more: HaveMore<T1>, t2: T2) -> TResult<MidFuse<T1, T2>>
where
    T1: Transformer + 'static,
    T2: Transformer<Item = T1::Out> + 'static,
{
    match t2.push(b) {
        TResult::Finished(_leftover) => {
            // t2's leftover is of type T1::Out, not T1::Item — it cannot
            // be the composed transformer's leftover, so it is dropped.
            // Whatever of t1's burst was still queued up is abandoned too.
            more.close();
            TResult::Finished(None)
        }
        TResult::Running(t2) => match more.pull() {
            TResult::Running(t1) => TResult::Running(MidFuse { t1, t2 }),
            TResult::Finished(leftover) => finish_with_live_t2(leftover, t2),
            TResult::HaveMore(more, b) => drain_t2(b, more, t2),
        },
        TResult::HaveMore(more_t2, c) => TResult::HaveMore(nested_burst(more_t2, more), c),
    }
}

/// Builds the outer [`HaveMore`] continuation for the case where `t2`
/// itself produced a burst while draining `t1`'s burst. Pulling resumes
/// `t2`'s burst first; only once it runs dry do we fall back to `more`
/// (`t1`'s own pending burst continuation) to find the next input for
/// `t2`. Closing runs both sides' close hooks in order — `t1`'s pending
/// burst first, then `t2`'s — matching how the rest of the crate always
/// closes the upstream side before the downstream side.
fn nested_burst<T1, T2>(more_t2: HaveMore<T2>, more: HaveMore<T1>) -> HaveMore<MidFuse<T1, T2>>
where
    T1: Transformer + 'static,
    T2: Transformer<Item = T1::Out> + 'static,
{
    let shared = Rc::new(RefCell::new(Some((more_t2, more))));
    let shared_close = Rc::clone(&shared);
    HaveMore::new(
        move || {
            let (more_t2, more) = shared.borrow_mut().take().unwrap_or_else(panic_burst_reused);
            continue_t2_burst(more_t2, more)
        },
        move || {
            if let Some((more_t2, more)) = shared_close.borrow_mut().take() {
                more.close();
                more_t2.close();
            }
        },
    )
}

fn continue_t2_burst<T1, T2>(more_t2: HaveMore<T2>, more: HaveMore<T1>) -> TResult<MidFuse<T1, T2>>
where
    T1: Transformer + 'static,
    T2: Transformer<Item = T1::Out> + 'static,
{
    match more_t2.pull() {
        TResult::Finished(_leftover) => {
            more.close();
            TResult::Finished(None)
        }
        TResult::Running(t2) => match more.pull() {
            TResult::Running(t1) => TResult::Running(MidFuse { t1, t2 }),
            TResult::Finished(leftover) => finish_with_live_t2(leftover, t2),
            TResult::HaveMore(more, b) => drain_t2(b, more, t2),
        },
        TResult::HaveMore(more_t2, c) => TResult::HaveMore(nested_burst(more_t2, more), c),
    }
}

#[inline(never)]
#[cold]
#[track_caller]
fn panic_burst_reused<T>() -> T {
    panic!("MidFuse burst continuation pulled or closed more than once")
}
