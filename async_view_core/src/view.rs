// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! The primary view trait and view path tracking.

use crate::message::MessageResult;
use crate::{MessageCtx, Mut, ViewElement};

/// A type which can be a [`View`]. Imposes no requirements on the underlying type.
/// Should be implemented alongside every `View` implementation:
/// ```ignore
/// impl<...> ViewMarker for Label<...> {}
/// impl<...> View<...> for Label<...> {...}
/// ```
pub trait ViewMarker {}

/// A lightweight description of a retained element, which is diffed against its previous
/// version to incrementally update that element.
///
/// The host calls [`build`](View::build) when a view is first mounted,
/// [`rebuild`](View::rebuild) with the previous view value whenever the view tree is
/// regenerated, and [`teardown`](View::teardown) when the view leaves the tree.
/// Messages sent to a view (for example the outcome of an async task) are routed through
/// [`message`](View::message) using the view path recorded in the [`ViewPathTracker`].
///
/// `State` is the app state which callbacks may mutate during message handling, and `Action`
/// is the type of action passed to the parent view.
pub trait View<State, Action, Context: ViewPathTracker>: ViewMarker + 'static {
    /// The element type which this view operates on.
    type Element: ViewElement;
    /// State that is used over the lifetime of the retained representation of the view.
    ///
    /// This is where a view stores routing information, handles to running tasks and
    /// anything else which has to survive between rebuilds.
    type ViewState;

    /// Create the corresponding element value.
    fn build(&self, ctx: &mut Context, app_state: &mut State) -> (Self::Element, Self::ViewState);

    /// Update `element` based on the difference between `self` and `prev`.
    fn rebuild(
        &self,
        prev: &Self,
        view_state: &mut Self::ViewState,
        ctx: &mut Context,
        element: Mut<'_, Self::Element>,
        app_state: &mut State,
    );

    /// Handle `element` being removed from the tree.
    ///
    /// The main use-cases of this method are to:
    /// - Cancel any async tasks
    /// - Clean up any book-keeping set-up in `build` and `rebuild`
    fn teardown(
        &self,
        view_state: &mut Self::ViewState,
        ctx: &mut Context,
        element: Mut<'_, Self::Element>,
    );

    /// Route `message` to its target, if that is still a valid path.
    fn message(
        &self,
        view_state: &mut Self::ViewState,
        message: &mut MessageCtx,
        element: Mut<'_, Self::Element>,
        app_state: &mut State,
    ) -> MessageResult<Action>;
}

/// An identifier used to differentiate between the direct children of a [`View`].
///
/// These are [`u64`] backed identifiers, which are added to the view path in
/// [`View::build`] and [`View::rebuild`], and removed from the start of the path
/// in [`View::message`].
/// The value of a `ViewId` is only meaningful to the view which added it to the path, and can
/// be used to store indices and/or generations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ViewId(u64);

impl ViewId {
    /// Create a new `ViewId` with the given value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Access the raw value of this id.
    #[must_use]
    pub const fn routing_id(self) -> u64 {
        self.0
    }
}

/// A tracker for view paths, used in [`View::build`] and [`View::rebuild`].
/// These paths are used for routing messages in [`View::message`].
///
/// Each `View` is expected to be implemented for one logical context type,
/// and this context may be used to store auxiliary data, such as the handle of the
/// runtime which async tasks are spawned on.
pub trait ViewPathTracker {
    /// Add `id` to the end of current view path
    fn push_id(&mut self, id: ViewId);
    /// Remove the most recently `push`ed id from the current view path
    fn pop_id(&mut self);

    /// The path to the current view in the view tree
    fn view_path(&mut self) -> &[ViewId];

    /// Run `f` in a context with `id` pushed to the current view path
    fn with_id<R>(&mut self, id: ViewId, f: impl FnOnce(&mut Self) -> R) -> R {
        self.push_id(id);
        let res = f(self);
        self.pop_id();
        res
    }
}
