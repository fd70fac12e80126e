// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! The reactive core of `AsyncView`.
//!
//! An [`AsyncView`] renders exactly one of three sub-views: an *initial* view while its task is
//! running, a *success* view built from the task's value, or a *failure* view built from the
//! task's error.
//! The task is launched when the view is first built, and launched again whenever the
//! view's identity changes. Results from runs which have since been superseded are
//! discarded, so the rendered state always corresponds to the latest identity.
//!
//! This crate is independent of any particular host. The host provides a context type which
//! implements [`ViewPathTracker`], [`TaskCtx`] (spawning and cancelling runs),
//! [`DisplayStateCtx`] (swapping the mounted sub-view) and [`PlaceholderCtx`] (the element
//! used when no initial view is given).
//! The `async_view` crate provides such a host on top of tokio.
//!
//! ## Constructors
//!
//! | Task                          | Without identity   | With identity              |
//! |-------------------------------|--------------------|----------------------------|
//! | cannot fail                   | [`async_view`]     | [`async_view_with_id`]     |
//! | returns `Result<Value, Error>`| [`try_async_view`] | [`try_async_view_with_id`] |
//!
//! Any of these can be given an initial view using [`AsyncView::initial`].
#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]
// LINEBENDER LINT SET - v1
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
#![deny(clippy::trivially_copy_pass_by_ref)]
extern crate alloc;

mod view;
pub use view::{View, ViewId, ViewMarker, ViewPathTracker};

mod element;
pub use element::{Mut, ViewElement};

mod message;
pub use message::{AnyMessage, DynMessage, MessageResult};

mod message_ctx;
pub use message_ctx::MessageCtx;

mod deferred;
pub use deferred::{MessageProxy, ProxyError, RawProxy, TaskCtx};

mod async_task;
pub use async_task::{AsyncTask, Fallible, NeverFails};

mod display_state;
pub use display_state::{DisplayState, DisplayStateCtx, DisplayViewState};

mod state_holder;
pub use state_holder::{SettleError, StateHolder};

mod views;
pub use views::{
    AsyncView, AsyncViewState, EmptyView, PlaceholderCtx, async_view, async_view_with_id, empty,
    try_async_view, try_async_view_with_id,
};
