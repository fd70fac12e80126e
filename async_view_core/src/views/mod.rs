// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

mod empty;
pub use empty::{EmptyView, PlaceholderCtx, empty};

mod async_view;
pub use async_view::{
    AsyncView, AsyncViewState, async_view, async_view_with_id, try_async_view,
    try_async_view_with_id,
};
