// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Debug;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::error::SendError;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::core::{DynMessage, MessageCtx, MessageResult, ProxyError, RawProxy, View, ViewId};
use crate::{Node, ViewCtx};

/// A message sent by a run, together with the path of the view which launched it.
type MessagePackage = (Arc<[ViewId]>, DynMessage);

#[derive(Debug)]
struct ChannelProxy(UnboundedSender<MessagePackage>);

impl RawProxy for ChannelProxy {
    fn send_message(&self, path: Arc<[ViewId]>, message: DynMessage) -> Result<(), ProxyError> {
        self.0
            .send((path, message))
            .map_err(|SendError((_, message))| ProxyError::DriverFinished(message))
    }

    fn dyn_debug(&self) -> &dyn Debug {
        self
    }
}

/// Owns the app state and the mounted view tree, and routes the outcomes of runs back into it.
///
/// `logic` is called to create the root view when the driver is created, and again whenever a
/// message handler produces an action or [`update`](Self::update) is called.
/// The root view is then rebuilt against its previous value.
///
/// The driver doesn't poll anything by itself: runs are spawned onto the runtime behind
/// `runtime`, and their outcomes are queued until [`dispatch_next`](Self::dispatch_next) or
/// [`dispatch_pending`](Self::dispatch_pending) is called.
pub struct Driver<State, Logic, V>
where
    V: View<State, (), ViewCtx>,
{
    state: State,
    logic: Logic,
    view: V,
    view_state: V::ViewState,
    root: V::Element,
    ctx: ViewCtx,
    receiver: UnboundedReceiver<MessagePackage>,
    scratch_id_path: Vec<ViewId>,
}

impl<State, Logic, V> Driver<State, Logic, V>
where
    State: 'static,
    Logic: FnMut(&mut State) -> V,
    V: View<State, (), ViewCtx, Element = Node>,
{
    /// Build the root view returned by `logic`, spawning its tasks onto `runtime`.
    pub fn new(mut state: State, mut logic: Logic, runtime: Handle) -> Self {
        let (sender, receiver) = unbounded_channel();
        let mut ctx = ViewCtx::new(Arc::new(ChannelProxy(sender)), runtime);
        let view = logic(&mut state);
        let (root, view_state) = view.build(&mut ctx, &mut state);
        tracing::debug!(root = ?root.content(), "Mounted root view");
        Self {
            state,
            logic,
            view,
            view_state,
            root,
            ctx,
            receiver,
            scratch_id_path: Vec::new(),
        }
    }

    /// The root element.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The app state.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Modify the app state, then rebuild the view tree.
    pub fn update(&mut self, f: impl FnOnce(&mut State)) {
        f(&mut self.state);
        self.run_logic();
    }

    fn run_logic(&mut self) {
        let next_view = (self.logic)(&mut self.state);
        next_view.rebuild(
            &self.view,
            &mut self.view_state,
            &mut self.ctx,
            &mut self.root,
            &mut self.state,
        );
        self.view = next_view;
    }

    fn dispatch(&mut self, path: Arc<[ViewId]>, message: DynMessage) {
        let mut id_path = std::mem::take(&mut self.scratch_id_path);
        id_path.clear();
        id_path.extend_from_slice(&path);
        let mut message_ctx = MessageCtx::new(id_path, message);
        let result = self.view.message(
            &mut self.view_state,
            &mut message_ctx,
            &mut self.root,
            &mut self.state,
        );
        let (id_path, _message) = message_ctx.finish();
        self.scratch_id_path = id_path;

        match result {
            // An action means that the app state may have changed, so the logic is rerun.
            MessageResult::Action(()) => self.run_logic(),
            // The view tree is rebuilt against itself, the app state is unchanged.
            MessageResult::RequestRebuild => {
                self.view.rebuild(
                    &self.view,
                    &mut self.view_state,
                    &mut self.ctx,
                    &mut self.root,
                    &mut self.state,
                );
            }
            MessageResult::Nop => {}
            MessageResult::Stale => {
                tracing::debug!(?path, "Discarding stale message");
            }
        }
    }

    /// Wait for the next message from a run, and dispatch it.
    ///
    /// This waits forever if no run is in flight.
    pub async fn dispatch_next(&mut self) {
        // The context holds a sender, so the channel is never closed.
        if let Some((path, message)) = self.receiver.recv().await {
            self.dispatch(path, message);
        }
    }

    /// Dispatch every message which has already arrived, without waiting.
    ///
    /// Returns how many messages were dispatched.
    pub fn dispatch_pending(&mut self) -> usize {
        let mut count = 0;
        while let Ok((path, message)) = self.receiver.try_recv() {
            self.dispatch(path, message);
            count += 1;
        }
        count
    }

    /// Dispatch messages until `done` returns `true`.
    pub async fn dispatch_until(&mut self, mut done: impl FnMut(&State, &Node) -> bool) {
        while !done(&self.state, &self.root) {
            self.dispatch_next().await;
        }
    }

    /// Tear down the view tree, cancelling its runs, and return the app state.
    pub fn unmount(mut self) -> State {
        self.view
            .teardown(&mut self.view_state, &mut self.ctx, &mut self.root);
        tracing::debug!("Unmounted root view");
        self.state
    }
}

impl<State, Logic, V> Debug for Driver<State, Logic, V>
where
    V: View<State, (), ViewCtx>,
    V::Element: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Driver")
            .field("root", &self.root)
            .field("ctx", &self.ctx)
            .finish_non_exhaustive()
    }
}
