//! [![license:MIT/Apache-2.0][1]](https://github.com/uazu/streamwork)&nbsp;
//! [![github:uazu/streamwork][2]](https://github.com/uazu/streamwork)&nbsp;
//! [![crates.io:streamwork][3]](https://crates.io/crates/streamwork)&nbsp;
//! [![docs.rs:streamwork][4]](https://docs.rs/streamwork)
//!
//! [1]: https://img.shields.io/badge/license-MIT%2FApache--2.0-blue
//! [2]: https://img.shields.io/badge/github-uazu%2Fstreamwork-brightgreen
//! [3]: https://img.shields.io/badge/crates.io-streamwork-red
//! [4]: https://img.shields.io/badge/docs.rs-streamwork-purple
//!
//! Composable pull/push stream abstractions
//!
//! **streamwork** is a small algebra for wiring together streaming code
//! one element at a time: a pull-driven [`Producer`], a push-driven
//! [`Consumer`], and a push-driven [`Transformer`] that sits between
//! them. None of the three knows about the others' concrete types; they
//! are glued together by three composition operators —
//! [`fuse::left_fuse`], [`fuse::right_fuse`] and [`fuse::mid_fuse`] — and
//! driven to a result by [`connect::connect`]. [`buffered::BufferedProducer`]
//! is the one stateful piece: it wraps a [`Producer`] so that it can
//! survive more than one [`connect`](connect::connect) call, with a
//! one-slot pushback for whatever a consumer didn't use.
//!
//! # Why three abstractions, not one
//!
//! A [`Producer`] is pulled: each pull consumes the producer and hands
//! back its replacement plus (maybe) an item. A [`Consumer`] is pushed:
//! each push consumes the active state and hands back its replacement,
//! or a final result. Neither one can stand in for the other — a
//! producer can't be asked "are you done yet" without pulling it, and a
//! consumer can't be asked for its next item without feeding it one.
//!
//! A [`Transformer`] needs both halves: it's pushed from upstream, but
//! its `close` is itself a [`Producer`] — the "drain" of whatever output
//! it's still holding once its input has run out. A decompressor is the
//! textbook case: one compressed chunk can legitimately expand into a
//! burst of plain-text chunks (see [`transformer::TResult::HaveMore`]),
//! and the final compressed block can still have plaintext left to
//! unpack after the compressed stream itself has ended (the drain).
//!
//! # A minimal pipeline
//!
//! ```
//! # #[cfg(feature = "alloc")] {
//! use streamwork::connect::connect;
//! use streamwork::consumer::{Active, Consumer, Push};
//! use streamwork::producer::{Producer, PullResult};
//!
//! struct Range { cur: i64, hi: i64 }
//! impl Producer for Range {
//!     type Item = i64;
//!     fn pull(self) -> PullResult<Self> {
//!         if self.cur >= self.hi {
//!             PullResult::Closed
//!         } else {
//!             PullResult::Open(Range { cur: self.cur + 1, hi: self.hi }, self.cur)
//!         }
//!     }
//!     fn close(self) {}
//! }
//!
//! struct Sum(i64);
//! impl Active for Sum {
//!     type Item = i64;
//!     type Output = i64;
//!     fn push(self: Box<Self>, item: i64) -> Push<i64, i64> {
//!         Push::Running(Box::new(Sum(self.0 + item)))
//!     }
//!     fn close(self: Box<Self>) -> i64 { self.0 }
//! }
//!
//! let total = connect(Range { cur: 0, hi: 4 }, Consumer::active(Sum(0)));
//! assert_eq!(total, 0 + 1 + 2 + 3);
//! # }
//! ```
//!
//! # Linearity
//!
//! Producers, consumers and transformers are one-shot by construction:
//! every operation that finalizes a state (a pull to [`producer::PullResult::Closed`],
//! a push to [`consumer::Push::Done`], an explicit `close`) consumes
//! `self` by value, so Rust's ownership rules make re-use a compile
//! error rather than a runtime one. [`buffered::BufferedProducer`] is the
//! single carefully-engineered exception — see its module docs for the
//! four-state invariant table it enforces at runtime instead.
//!
//! # Error handling
//!
//! This crate has no error type of its own. Effectful failures (a
//! broken file handle, a malformed record) are the concern of whatever
//! concrete producer/consumer/transformer a caller plugs in — make
//! `Item`/`Out`/`Output` a `Result<_, E>` if that's what's needed, and it
//! flows through every fuse untouched. What this crate *does* own is a
//! small set of invariant violations (double-pull, double-close, a
//! pushback onto a full [`buffered::BufferedProducer`] slot) that are
//! programmer errors, not recoverable conditions, and which panic loudly
//! rather than returning a `Result`.
//!
//! # `no_std` support
//!
//! The `Producer`/`PullResult` pair and [`flush::Flush`] need nothing
//! beyond `core` and compile with no features at all. Everything that
//! needs to box a closure or share a cell — [`Consumer`], [`Transformer`]'s
//! `HaveMore` bursts, all three fuses, and [`buffered::BufferedProducer`]
//! — needs an allocator, gated behind the `alloc` feature (which `std`,
//! the default, implies). There is no `static`/fixed-capacity mode here:
//! nothing in this algebra has a byte-buffer-style capacity to size up
//! front.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod producer;
pub use producer::{Producer, PullResult};

pub mod flush;
pub use flush::Flush;

#[cfg_attr(docsrs, doc(cfg(feature = "alloc")))]
#[cfg(feature = "alloc")]
pub mod consumer;
#[cfg(feature = "alloc")]
pub use consumer::{Active, Consumer, Push};

#[cfg_attr(docsrs, doc(cfg(feature = "alloc")))]
#[cfg(feature = "alloc")]
pub mod transformer;
#[cfg(feature = "alloc")]
pub use transformer::{HaveMore, TResult, Transformer};

#[cfg_attr(docsrs, doc(cfg(feature = "alloc")))]
#[cfg(feature = "alloc")]
pub mod connect;
#[cfg(feature = "alloc")]
pub use connect::connect;

#[cfg_attr(docsrs, doc(cfg(feature = "alloc")))]
#[cfg(feature = "alloc")]
pub mod buffered;
#[cfg(feature = "alloc")]
pub use buffered::{connect_buffered, BufferedProducer, Unbuffered};

#[cfg_attr(docsrs, doc(cfg(feature = "alloc")))]
#[cfg(feature = "alloc")]
pub mod fuse;
#[cfg(feature = "alloc")]
pub use fuse::{left_fuse, left_fuse_buffered, mid_fuse, right_fuse, LeftFuse, LeftFuseBuffered, MidFuse};
