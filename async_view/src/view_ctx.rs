// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

use std::future::Future;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::Node;
use crate::core::{
    DisplayState, DisplayStateCtx, Mut, PlaceholderCtx, RawProxy, TaskCtx, ViewId,
    ViewPathTracker,
};
use crate::node::Content;

/// A context type passed to the methods of the views in this crate.
///
/// Runs are spawned onto the tokio runtime behind `runtime`, and send their outcomes through
/// `proxy`.
#[derive(Debug)]
pub struct ViewCtx {
    id_path: Vec<ViewId>,
    proxy: Arc<dyn RawProxy>,
    runtime: Handle,
}

impl ViewCtx {
    /// Create a context whose runs send their outcomes through `proxy`.
    pub fn new(proxy: Arc<dyn RawProxy>, runtime: Handle) -> Self {
        Self {
            id_path: Vec::new(),
            proxy,
            runtime,
        }
    }
}

impl ViewPathTracker for ViewCtx {
    fn push_id(&mut self, id: ViewId) {
        self.id_path.push(id);
    }

    fn pop_id(&mut self) {
        self.id_path.pop();
    }

    fn view_path(&mut self) -> &[ViewId] {
        &self.id_path
    }
}

impl TaskCtx for ViewCtx {
    type RunHandle = JoinHandle<()>;

    fn proxy(&mut self) -> Arc<dyn RawProxy> {
        self.proxy.clone()
    }

    fn spawn<F>(&mut self, future: F) -> Self::RunHandle
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.runtime.spawn(future)
    }

    fn cancel(&mut self, handle: Self::RunHandle) {
        handle.abort();
    }
}

impl PlaceholderCtx for ViewCtx {
    type Placeholder = Node;

    fn placeholder(&mut self) -> Self::Placeholder {
        Node::new(Content::Placeholder, self.id_path.clone())
    }
}

impl DisplayStateCtx<Node, Node, Node> for ViewCtx {
    type DisplayElement = Node;

    fn with_downcast_initial(
        elem: &mut Mut<'_, Self::DisplayElement>,
        f: impl FnOnce(Mut<'_, Node>),
    ) {
        f(elem);
    }

    fn with_downcast_success(
        elem: &mut Mut<'_, Self::DisplayElement>,
        f: impl FnOnce(Mut<'_, Node>),
    ) {
        f(elem);
    }

    fn with_downcast_failure(
        elem: &mut Mut<'_, Self::DisplayElement>,
        f: impl FnOnce(Mut<'_, Node>),
    ) {
        f(elem);
    }

    fn upcast_display_element(
        &mut self,
        elem: DisplayState<Node, Node, Node>,
    ) -> Self::DisplayElement {
        into_node(elem)
    }

    fn update_display_element_mut(
        elem_mut: &mut Mut<'_, Self::DisplayElement>,
        new_elem: DisplayState<Node, Node, Node>,
    ) {
        elem_mut.replace(into_node(new_elem));
    }
}

fn into_node(state: DisplayState<Node, Node, Node>) -> Node {
    match state {
        DisplayState::Initial(node)
        | DisplayState::Success(node)
        | DisplayState::Failure(node) => node,
    }
}
