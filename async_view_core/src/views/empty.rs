// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

use crate::{MessageCtx, MessageResult, Mut, View, ViewElement, ViewMarker, ViewPathTracker};

/// The host capability for creating an element which renders nothing.
///
/// This is what [`EmptyView`] builds. The placeholder is a real element in the host's tree,
/// so an [`AsyncView`](crate::AsyncView) without an initial view still has a mount point
/// which its success or failure view can replace.
pub trait PlaceholderCtx: ViewPathTracker {
    /// The placeholder element type.
    type Placeholder: ViewElement;

    /// Create a new placeholder element.
    fn placeholder(&mut self) -> Self::Placeholder;
}

/// A view which renders nothing, see [`empty`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyView;

/// A view which renders nothing, but still occupies a slot in the element tree.
///
/// This is the default initial view of an [`AsyncView`](crate::AsyncView), and the failure
/// view of tasks which can't fail.
pub fn empty() -> EmptyView {
    EmptyView
}

impl ViewMarker for EmptyView {}
impl<State, Action, Context> View<State, Action, Context> for EmptyView
where
    Context: PlaceholderCtx,
{
    type Element = Context::Placeholder;
    type ViewState = ();

    fn build(&self, ctx: &mut Context, _: &mut State) -> (Self::Element, Self::ViewState) {
        (ctx.placeholder(), ())
    }

    fn rebuild(
        &self,
        _: &Self,
        (): &mut Self::ViewState,
        _: &mut Context,
        _: Mut<'_, Self::Element>,
        _: &mut State,
    ) {
    }

    fn teardown(&self, (): &mut Self::ViewState, _: &mut Context, _: Mut<'_, Self::Element>) {}

    fn message(
        &self,
        (): &mut Self::ViewState,
        message: &mut MessageCtx,
        _: Mut<'_, Self::Element>,
        _: &mut State,
    ) -> MessageResult<Action> {
        tracing::debug!(
            path = ?message.remaining_path(),
            "Message sent to an empty view, which has no children"
        );
        MessageResult::Stale
    }
}
