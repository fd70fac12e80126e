// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

use crate::core::{MessageCtx, MessageResult, Mut, View, ViewMarker, ViewPathTracker};
use crate::node::Content;
use crate::{Node, ViewCtx};

/// A non-interactive text element.
///
/// # Example
///
/// ```ignore
/// use async_view::view::label;
///
/// label("Loading")
/// ```
pub fn label(text: impl Into<String>) -> Label {
    Label { text: text.into() }
}

/// The [`View`] created by [`label`].
#[must_use = "View values do nothing unless provided to an async view host."]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    text: String,
}

impl ViewMarker for Label {}
impl<State: 'static, Action: 'static> View<State, Action, ViewCtx> for Label {
    type Element = Node;
    type ViewState = ();

    fn build(&self, ctx: &mut ViewCtx, _: &mut State) -> (Self::Element, Self::ViewState) {
        let node = Node::new(Content::Text(self.text.clone()), ctx.view_path().to_vec());
        (node, ())
    }

    fn rebuild(
        &self,
        prev: &Self,
        (): &mut Self::ViewState,
        _: &mut ViewCtx,
        element: Mut<'_, Self::Element>,
        _: &mut State,
    ) {
        if prev.text != self.text {
            element.set_text(&self.text);
        }
    }

    fn teardown(&self, (): &mut Self::ViewState, _: &mut ViewCtx, _: Mut<'_, Self::Element>) {}

    fn message(
        &self,
        (): &mut Self::ViewState,
        _: &mut MessageCtx,
        _: Mut<'_, Self::Element>,
        _: &mut State,
    ) -> MessageResult<Action> {
        tracing::error!(
            "Message arrived in Label::message, but Label doesn't consume any messages, this is a bug"
        );
        MessageResult::Stale
    }
}
