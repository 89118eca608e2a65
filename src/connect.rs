//! The terminal operation that drives a pipeline to its result.

use crate::consumer::{Consumer, Push};
use crate::producer::{Producer, PullResult};

/// Drive `producer` into `consumer` and return the consumer's final
/// value.
///
/// # Algorithm
///
/// - [`Consumer::NoData`]: returned immediately. `producer` is neither
///   pulled nor closed — this is the reason `connect` inspects the
///   consumer *before* touching the producer at all.
/// - [`Consumer::Suspend`]: the thunk runs, and `connect` retries with
///   its result.
/// - [`Consumer::Active`]: `producer` is pulled in a loop and each item
///   pushed into the active state. On `Push::Done`, the producer's
///   continuation is closed unconditionally — any leftover item is
///   discarded deliberately; [`crate::buffered`] is the escape hatch for
///   callers who need the leftover preserved. On upstream `Closed`, the
///   consumer is closed and its result returned.
pub fn connect<P: Producer, B>(mut producer: P, mut consumer: Consumer<P::Item, B>) -> B {
    loop {
        consumer = match consumer {
            Consumer::NoData(b) => return b,
            Consumer::Suspend(thunk) => thunk(),
            Consumer::Active(active) => match producer.pull() {
                PullResult::Closed => return active.close(),
                PullResult::Open(next, item) => {
                    producer = next;
                    match active.push(item) {
                        Push::Done(_leftover, b) => {
                            producer.close();
                            return b;
                        }
                        Push::Running(active) => {
                            consumer = Consumer::Active(active);
                            continue;
                        }
                    }
                }
            },
        };
    }
}
