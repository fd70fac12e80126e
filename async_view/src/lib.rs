// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! `AsyncView` is a view which renders one of three sub-views, depending on the outcome of an
//! asynchronous task: an *initial* view while the task is running, a *success* view built from
//! its value, or a *failure* view built from its error.
//! Whenever the view's identity changes, the task is run again, and any outcome of the
//! previous run which is still in flight is discarded.
//!
//! The reactive layer lives in [`AsyncView` Core][async_view_core], which is re-exported as
//! [`core`].
//! This crate provides a host for it on top of [tokio]: tasks are spawned on a tokio runtime,
//! their outcomes travel back to the view tree over a channel, and the rendered output is a
//! retained [`Node`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use async_view::core::async_view;
//! use async_view::view::label;
//! use async_view::{AsyncApp, Node};
//!
//! fn main() -> std::io::Result<()> {
//!     let app = AsyncApp::new((), |_: &mut ()| {
//!         async_view(
//!             || async {
//!                 tokio::time::sleep(Duration::from_secs(2)).await;
//!                 "Hello world"
//!             },
//!             label,
//!         )
//!         .initial(|| label("Loading"))
//!     });
//!     app.run_until(|(), root: &Node| root.text() == Some("Hello world"))?;
//!     Ok(())
//! }
//! ```
//!
//! ## Hosts
//!
//! [`Driver`] owns the app state and the mounted view tree, and is driven by an async caller.
//! [`AsyncApp`] creates a runtime and a `Driver` for you, and runs it until a condition holds.
//!
//! Logging uses [`tracing`]. [`try_init_tracing`] installs a default subscriber, which can be
//! configured through `RUST_LOG`.
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET

pub use async_view_core as core;
pub use tokio;

mod app;
mod driver;
mod node;
mod tracing_backend;
mod view_ctx;

pub mod view;

pub use app::AsyncApp;
pub use driver::Driver;
pub use node::{Content, Node};
pub use tracing_backend::{
    TracingSubscriberHasBeenSetError, try_init_test_tracing, try_init_tracing,
};
pub use view_ctx::ViewCtx;
