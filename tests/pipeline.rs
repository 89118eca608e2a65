//! End-to-end pipeline scenarios, driven entirely through the public
//! API: `connect`, `left_fuse`, `right_fuse`, `mid_fuse`, and
//! `BufferedProducer`.

use std::cell::Cell;

use streamwork::connect::connect;
use streamwork::consumer::{Active, Consumer, Push};
use streamwork::fuse::{left_fuse, mid_fuse, right_fuse};
use streamwork::producer::{Producer, PullResult};
use streamwork::transformer::{HaveMore, TResult, Transformer};
use streamwork::{connect_buffered, BufferedProducer};

/// `rangeProducer(lo, hi)`: yields `lo, lo+1, .., hi-1` then closes.
struct RangeProducer {
    cur: i64,
    hi: i64,
}

fn range_producer(lo: i64, hi: i64) -> RangeProducer {
    RangeProducer { cur: lo, hi }
}

impl Producer for RangeProducer {
    type Item = i64;

    fn pull(self) -> PullResult<Self> {
        if self.cur >= self.hi {
            PullResult::Closed
        } else {
            let cur = self.cur;
            PullResult::Open(RangeProducer { cur: cur + 1, hi: self.hi }, cur)
        }
    }

    fn close(self) {}
}

/// A producer that panics if pulled or closed, used to assert that
/// `connect` with a `NoData` consumer never touches its producer.
struct UntouchedProducer;

impl Producer for UntouchedProducer {
    type Item = i64;
    fn pull(self) -> PullResult<Self> {
        panic!("pulled a producer that NoData should never touch")
    }
    fn close(self) {
        panic!("closed a producer that NoData should never touch")
    }
}

/// `sumConsumer`: folds with `+` starting at 0, returns on close.
struct SumState(i64);

fn sum_consumer() -> Consumer<i64, i64> {
    Consumer::active(SumState(0))
}

impl Active for SumState {
    type Item = i64;
    type Output = i64;

    fn push(self: Box<Self>, item: i64) -> Push<i64, i64> {
        Push::Running(Box::new(SumState(self.0 + item)))
    }

    fn close(self: Box<Self>) -> i64 {
        self.0
    }
}

/// A drain that never has anything left to say.
struct EmptyDrain;

impl Producer for EmptyDrain {
    type Item = i64;
    fn pull(self) -> PullResult<Self> {
        PullResult::Closed
    }
    fn close(self) {}
}

/// `doubler`: stateless `x -> 2x` transformer.
struct Doubler;

impl Transformer for Doubler {
    type Item = i64;
    type Out = i64;
    type Drain = EmptyDrain;

    fn push(self, item: i64) -> TResult<Self> {
        TResult::HaveMore(HaveMore::new(move || TResult::Running(Doubler), || {}), item * 2)
    }

    fn close(self) -> EmptyDrain {
        EmptyDrain
    }
}

/// `explode`: emits `x, x` for each input via a two-deep `HaveMore` chain.
struct Explode;

impl Transformer for Explode {
    type Item = i64;
    type Out = i64;
    type Drain = EmptyDrain;

    fn push(self, item: i64) -> TResult<Self> {
        TResult::HaveMore(
            HaveMore::new(move || TResult::HaveMore(HaveMore::new(move || TResult::Running(Explode), || {}), item), || {}),
            item,
        )
    }

    fn close(self) -> EmptyDrain {
        EmptyDrain
    }
}

/// `takeTwo`: reads exactly two inputs, returns them as `Done` with no
/// leftover.
enum TakeTwoState {
    First,
    Second(i64),
}

fn take_two() -> Consumer<i64, (i64, i64)> {
    Consumer::active(TakeTwoState::First)
}

impl Active for TakeTwoState {
    type Item = i64;
    type Output = (i64, i64);

    fn push(self: Box<Self>, item: i64) -> Push<i64, (i64, i64)> {
        match *self {
            TakeTwoState::First => Push::Running(Box::new(TakeTwoState::Second(item))),
            TakeTwoState::Second(first) => Push::Done(None, (first, item)),
        }
    }

    fn close(self: Box<Self>) -> (i64, i64) {
        panic!("takeTwo closed before reading two items")
    }
}

/// A consumer that finishes on its very first push without consuming the
/// item, used to exercise leftover propagation/loss.
struct Peek;

impl Active for Peek {
    type Item = i64;
    type Output = i64;

    fn push(self: Box<Self>, item: i64) -> Push<i64, i64> {
        Push::Done(Some(item), item)
    }

    fn close(self: Box<Self>) -> i64 {
        panic!("Peek closed without ever being pushed into")
    }
}

#[test]
fn scenario_1_sum_of_a_range() {
    assert_eq!(connect(range_producer(0, 4), sum_consumer()), 6);
}

#[test]
fn scenario_2_left_fuse_doubler_then_sum() {
    let p = left_fuse(range_producer(0, 3), Doubler);
    assert_eq!(connect(p, sum_consumer()), 0 + 2 + 4);
}

#[test]
fn scenario_3_right_fuse_doubler_then_sum() {
    let c = right_fuse(Doubler, sum_consumer());
    assert_eq!(connect(range_producer(0, 5), c), 0 + 2 + 4 + 6 + 8);
}

#[test]
fn scenario_4_left_fuse_explode_then_sum() {
    let p = left_fuse(range_producer(1, 4), Explode);
    assert_eq!(connect(p, sum_consumer()), 1 + 1 + 2 + 2 + 3 + 3);
}

#[test]
fn scenario_5_buffered_producer_preserves_leftover_and_closes_idempotently() {
    let buf = BufferedProducer::new(range_producer(10, 20));
    let result = connect_buffered(&buf, take_two());
    assert_eq!(result, (10, 11));
    assert_eq!(buf.pull_buffered(), Some(12));

    buf.close_buffered();
    assert_eq!(buf.pull_buffered(), None);
    // Closing twice, or pulling again after close, stays `None`.
    buf.close_buffered();
    assert_eq!(buf.pull_buffered(), None);
}

#[test]
fn scenario_6_no_data_short_circuits_without_any_pull_or_close() {
    let c: Consumer<i64, i64> = Consumer::no_data(42);
    assert_eq!(connect(UntouchedProducer, c), 42);
}

#[test]
fn law_identity_of_no_data_with_a_live_producer() {
    // Even a producer with elements to give up must not be touched.
    let c: Consumer<i64, i64> = Consumer::no_data(7);
    assert_eq!(connect(UntouchedProducer, c), 7);
}

#[test]
fn law_drain_uniformity_left_fuse_equals_right_fuse() {
    let via_left = connect(left_fuse(range_producer(0, 6), Doubler), sum_consumer());
    let via_right = connect(range_producer(0, 6), right_fuse(Doubler, sum_consumer()));
    assert_eq!(via_left, via_right);
}

#[test]
fn law_mid_fuse_associativity() {
    // midFuse(midFuse(doubler, doubler), explode) vs
    // midFuse(doubler, midFuse(doubler, explode)) — same shape either way
    // of associating, same observable output.
    let left_assoc = mid_fuse(mid_fuse(Doubler, Doubler), Explode);
    let right_assoc = mid_fuse(Doubler, mid_fuse(Doubler, Explode));

    let via_left_assoc = connect(left_fuse(range_producer(0, 3), left_assoc), sum_consumer());
    let via_right_assoc = connect(left_fuse(range_producer(0, 3), right_assoc), sum_consumer());
    assert_eq!(via_left_assoc, via_right_assoc);
    // Regardless of how the two mid_fuse calls associate, the data still
    // flows doubler -> doubler -> explode: each input x becomes two
    // copies of 4x. 0 -> 0,0; 1 -> 4,4; 2 -> 8,8.
    assert_eq!(via_left_assoc, 0 + 8 + 16);
}

#[test]
fn law_leftover_loss_on_plain_producer() {
    let closed = std::rc::Rc::new(Cell::new(false));
    struct Tracked {
        inner: RangeProducer,
        closed: std::rc::Rc<Cell<bool>>,
    }
    impl Producer for Tracked {
        type Item = i64;
        fn pull(self) -> PullResult<Self> {
            match self.inner.pull() {
                PullResult::Closed => PullResult::Closed,
                PullResult::Open(next, item) => PullResult::Open(
                    Tracked { inner: next, closed: self.closed },
                    item,
                ),
            }
        }
        fn close(self) {
            self.closed.set(true);
        }
    }

    let p = Tracked { inner: range_producer(0, 5), closed: closed.clone() };
    let result = connect(p, Consumer::active(Peek));
    assert_eq!(result, 0);
    // The consumer reported `0` as leftover, but connect's plain-producer
    // clause discards it and closes the producer unconditionally.
    assert!(closed.get());
}

#[test]
fn law_have_more_drains_before_next_input() {
    // explode emits a burst (x, x) before the *next* input's burst starts.
    // A consumer that records arrival order lets us check the ordering
    // directly rather than just the sum.
    struct Recorder(std::rc::Rc<std::cell::RefCell<Vec<i64>>>);
    impl Active for Recorder {
        type Item = i64;
        type Output = ();
        fn push(self: Box<Self>, item: i64) -> Push<i64, ()> {
            self.0.borrow_mut().push(item);
            Push::Running(self)
        }
        fn close(self: Box<Self>) {}
    }

    let log = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let p = left_fuse(range_producer(1, 3), Explode);
    connect(p, Consumer::active(Recorder(log.clone())));
    assert_eq!(*log.borrow(), vec![1, 1, 2, 2]);
}

#[test]
fn unbuffer_reads_pushback_then_falls_through_to_underlying() {
    let buf = BufferedProducer::new(range_producer(0, 2));
    buf.unpull(Some(-1));
    let unbuffered = buf.unbuffer();
    let (item, next) = unbuffered.pull().into_parts().unwrap();
    assert_eq!(item, -1);
    let (item, next) = next.pull().into_parts().unwrap();
    assert_eq!(item, 0);
    let (item, next) = next.pull().into_parts().unwrap();
    assert_eq!(item, 1);
    assert!(next.pull().is_closed());
}
