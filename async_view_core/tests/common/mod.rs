// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code, reason = "Each test file uses a different subset of these helpers")]

use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use async_view_core::*;
use futures::executor::block_on;

type QueuedRun = (u64, Pin<Box<dyn Future<Output = ()> + Send>>);

/// A context which records everything views ask of it.
///
/// Spawned runs are only queued, and are polled when a test calls [`TestCtx::run_all`] or
/// [`TestCtx::run_live`], so tests control when tasks complete.
pub(crate) struct TestCtx {
    path: Vec<ViewId>,
    proxy: Arc<RecordingProxy>,
    queue: Vec<QueuedRun>,
    spawned: u64,
    pub cancelled: Vec<RunHandle>,
}

impl TestCtx {
    pub(crate) fn new() -> Self {
        Self {
            path: Vec::new(),
            proxy: Arc::new(RecordingProxy::default()),
            queue: Vec::new(),
            spawned: 0,
            cancelled: Vec::new(),
        }
    }

    /// How many runs have been spawned in total.
    pub(crate) fn spawned(&self) -> u64 {
        self.spawned
    }

    /// Run every queued run to completion, including cancelled ones.
    ///
    /// This simulates a run which finished before its cancellation took effect.
    pub(crate) fn run_all(&mut self) {
        for (_, run) in self.queue.drain(..) {
            block_on(run);
        }
    }

    /// Run the runs which haven't been cancelled, and drop the others.
    pub(crate) fn run_live(&mut self) {
        for (handle, run) in self.queue.drain(..) {
            if !self.cancelled.contains(&RunHandle(handle)) {
                block_on(run);
            }
        }
    }

    pub(crate) fn take_messages(&self) -> Vec<(Arc<[ViewId]>, DynMessage)> {
        std::mem::take(&mut *self.proxy.sent.lock().unwrap())
    }
}

impl ViewPathTracker for TestCtx {
    fn push_id(&mut self, id: ViewId) {
        self.path.push(id);
    }
    fn pop_id(&mut self) {
        self.path.pop();
    }
    fn view_path(&mut self) -> &[ViewId] {
        &self.path
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RunHandle(pub u64);

impl TaskCtx for TestCtx {
    type RunHandle = RunHandle;

    fn proxy(&mut self) -> Arc<dyn RawProxy> {
        self.proxy.clone()
    }

    fn spawn<F>(&mut self, future: F) -> Self::RunHandle
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = self.spawned;
        self.spawned += 1;
        self.queue.push((handle, Box::pin(future)));
        RunHandle(handle)
    }

    fn cancel(&mut self, handle: Self::RunHandle) {
        self.cancelled.push(handle);
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingProxy {
    sent: Mutex<Vec<(Arc<[ViewId]>, DynMessage)>>,
}

impl RawProxy for RecordingProxy {
    fn send_message(&self, path: Arc<[ViewId]>, message: DynMessage) -> Result<(), ProxyError> {
        self.sent.lock().unwrap().push((path, message));
        Ok(())
    }

    fn dyn_debug(&self) -> &dyn Debug {
        self
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub(crate) enum Operation {
    Build,
    Rebuild,
    Teardown,
    Replace,
}

#[derive(Debug, Clone)]
pub(crate) struct TestElement {
    /// `None` for a placeholder.
    pub text: Option<String>,
    pub operations: Vec<Operation>,
    pub view_path: Vec<ViewId>,
}

impl TestElement {
    pub(crate) fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl ViewElement for TestElement {
    type Mut<'a> = &'a mut Self;
}

/// A view which displays some text.
///
/// Any message routed to it produces an action, so tests can tell that it was reached.
#[derive(Debug, Clone)]
pub(crate) struct TextView(pub String);

pub(crate) fn text(value: &str) -> TextView {
    TextView(value.to_string())
}

impl ViewMarker for TextView {}
impl View<(), (), TestCtx> for TextView {
    type Element = TestElement;
    type ViewState = ();

    fn build(&self, ctx: &mut TestCtx, (): &mut ()) -> (Self::Element, Self::ViewState) {
        (
            TestElement {
                text: Some(self.0.clone()),
                operations: vec![Operation::Build],
                view_path: ctx.view_path().to_vec(),
            },
            (),
        )
    }

    fn rebuild(
        &self,
        _: &Self,
        (): &mut Self::ViewState,
        ctx: &mut TestCtx,
        element: Mut<'_, Self::Element>,
        (): &mut (),
    ) {
        assert_eq!(&*element.view_path, ctx.view_path());
        element.text = Some(self.0.clone());
        element.operations.push(Operation::Rebuild);
    }

    fn teardown(
        &self,
        (): &mut Self::ViewState,
        ctx: &mut TestCtx,
        element: Mut<'_, Self::Element>,
    ) {
        assert_eq!(&*element.view_path, ctx.view_path());
        element.operations.push(Operation::Teardown);
    }

    fn message(
        &self,
        (): &mut Self::ViewState,
        _: &mut MessageCtx,
        _: Mut<'_, Self::Element>,
        (): &mut (),
    ) -> MessageResult<()> {
        MessageResult::Action(())
    }
}

impl PlaceholderCtx for TestCtx {
    type Placeholder = TestElement;

    fn placeholder(&mut self) -> Self::Placeholder {
        TestElement {
            text: None,
            operations: vec![Operation::Build],
            view_path: self.view_path().to_vec(),
        }
    }
}

impl DisplayStateCtx<TestElement, TestElement, TestElement> for TestCtx {
    type DisplayElement = TestElement;

    fn with_downcast_initial(
        elem: &mut Mut<'_, Self::DisplayElement>,
        f: impl FnOnce(Mut<'_, TestElement>),
    ) {
        f(elem);
    }

    fn with_downcast_success(
        elem: &mut Mut<'_, Self::DisplayElement>,
        f: impl FnOnce(Mut<'_, TestElement>),
    ) {
        f(elem);
    }

    fn with_downcast_failure(
        elem: &mut Mut<'_, Self::DisplayElement>,
        f: impl FnOnce(Mut<'_, TestElement>),
    ) {
        f(elem);
    }

    fn upcast_display_element(
        &mut self,
        elem: DisplayState<TestElement, TestElement, TestElement>,
    ) -> Self::DisplayElement {
        match elem {
            DisplayState::Initial(e) | DisplayState::Success(e) | DisplayState::Failure(e) => e,
        }
    }

    fn update_display_element_mut(
        elem_mut: &mut Mut<'_, Self::DisplayElement>,
        new_elem: DisplayState<TestElement, TestElement, TestElement>,
    ) {
        let (DisplayState::Initial(new_elem)
        | DisplayState::Success(new_elem)
        | DisplayState::Failure(new_elem)) = new_elem;
        assert_eq!(new_elem.operations, [Operation::Build]);
        elem_mut.operations.push(Operation::Replace);
        elem_mut.text = new_elem.text;
        elem_mut.view_path = new_elem.view_path;
    }
}

/// A mounted view, with the plumbing to deliver the outcomes of its runs.
pub(crate) struct Harness<V: View<(), (), TestCtx>> {
    pub ctx: TestCtx,
    pub view: V,
    pub element: TestElement,
    pub state: V::ViewState,
}

impl<V: View<(), (), TestCtx, Element = TestElement>> Harness<V> {
    pub(crate) fn build(view: V) -> Self {
        let mut ctx = TestCtx::new();
        let (element, state) = view.build(&mut ctx, &mut ());
        Self {
            ctx,
            view,
            element,
            state,
        }
    }

    pub(crate) fn rebuild(&mut self, view: V) {
        view.rebuild(
            &self.view,
            &mut self.state,
            &mut self.ctx,
            &mut self.element,
            &mut (),
        );
        self.view = view;
    }

    pub(crate) fn teardown(&mut self) {
        self.view
            .teardown(&mut self.state, &mut self.ctx, &mut self.element);
    }

    pub(crate) fn message(&mut self, path: &[ViewId], message: DynMessage) -> MessageResult<()> {
        let mut message = MessageCtx::new(path.to_vec(), message);
        self.view
            .message(&mut self.state, &mut message, &mut self.element, &mut ())
    }

    /// Route every message sent by runs, without rebuilding.
    pub(crate) fn route(&mut self) -> Vec<MessageResult<()>> {
        self.ctx
            .take_messages()
            .into_iter()
            .map(|(path, message)| self.message(&path, message))
            .collect()
    }

    /// Route every message sent by runs, rebuilding whenever one requests it.
    pub(crate) fn deliver(&mut self) -> Vec<MessageResult<()>> {
        let mut results = Vec::new();
        for (path, message) in self.ctx.take_messages() {
            let result = self.message(&path, message);
            if matches!(result, MessageResult::RequestRebuild) {
                self.view.rebuild(
                    &self.view,
                    &mut self.state,
                    &mut self.ctx,
                    &mut self.element,
                    &mut (),
                );
            }
            results.push(result);
        }
        results
    }
}
