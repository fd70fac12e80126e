// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

use core::convert::Infallible;
use core::fmt::Debug;
use core::future::Future;

use crate::{
    AsyncTask, DisplayState, DisplayStateCtx, DisplayViewState, EmptyView, Fallible,
    MessageCtx, MessageProxy, MessageResult, Mut, NeverFails, StateHolder, TaskCtx, View, ViewId,
    ViewMarker, empty,
};

/// The child id of the mounted sub-view.
const CONTENT_ID: ViewId = ViewId::new(0);
/// The child id under which runs report their outcome, followed by the run's generation.
const RUN_ID: ViewId = ViewId::new(1);

/// A view which renders the outcome of an asynchronous task.
///
/// While the task for the current `id` is running, the *initial* view is shown. Once it
/// completes, the *success* or *failure* view is built from its outcome and replaces the
/// initial view.
/// When the view is rebuilt with an `id` which isn't equal to the previous one, the running
/// task is cancelled, the initial view is shown again and the task is launched for the new
/// `id`. Outcomes of superseded runs are never applied.
///
/// See the [crate root](crate#constructors) for the functions which create this view.
pub struct AsyncView<Id, Task, InitFn, SuccessFn, FailureFn> {
    id: Id,
    task: Task,
    initial: InitFn,
    success: SuccessFn,
    failure: FailureFn,
}

impl<Id, Task, InitFn, SuccessFn, FailureFn> AsyncView<Id, Task, InitFn, SuccessFn, FailureFn> {
    /// Create an `AsyncView` from its parts.
    ///
    /// Prefer the constructor functions, such as [`try_async_view_with_id`], unless `task` is a
    /// custom [`AsyncTask`].
    pub fn new(
        id: Id,
        task: Task,
        initial: InitFn,
        success: SuccessFn,
        failure: FailureFn,
    ) -> Self {
        Self {
            id,
            task,
            initial,
            success,
            failure,
        }
    }

    /// Show the view created by `initial` until the task completes.
    ///
    /// By default, nothing is shown.
    pub fn initial<NewInitFn, IV>(
        self,
        initial: NewInitFn,
    ) -> AsyncView<Id, Task, NewInitFn, SuccessFn, FailureFn>
    where
        NewInitFn: Fn() -> IV + 'static,
    {
        AsyncView {
            id: self.id,
            task: self.task,
            initial,
            success: self.success,
            failure: self.failure,
        }
    }

    /// The identity which this view's task is run for.
    pub fn id(&self) -> &Id {
        &self.id
    }
}

impl<Id: Debug, Task, InitFn, SuccessFn, FailureFn> Debug
    for AsyncView<Id, Task, InitFn, SuccessFn, FailureFn>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AsyncView")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// The view state of an [`AsyncView`].
#[derive(Debug)]
pub struct AsyncViewState<I, S, F, Mounted, Handle> {
    /// Identifies the current run. Incremented on every identity change.
    generation: u64,
    holder: StateHolder<I, S, F>,
    /// The view state of the mounted sub-view.
    mounted: Mounted,
    /// The sub-view which is still mounted after the holder was settled, until the next rebuild.
    outgoing: Option<DisplayState<I, S, F>>,
    run: Option<Handle>,
}

impl<I, S, F, Mounted, Handle> AsyncViewState<I, S, F, Mounted, Handle> {
    /// The display state for the current identity.
    ///
    /// This can be ahead of the mounted sub-view between a run completing and the
    /// following rebuild.
    pub fn display(&self) -> &DisplayState<I, S, F> {
        self.holder.current()
    }

    /// The generation of the current run, which starts at zero and increases with every
    /// identity change.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the run for the current identity is still in flight.
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }
}

/// The message which a run sends back to its view.
struct RunOutcome<V, E> {
    result: Result<V, E>,
}

impl<V, E> Debug for RunOutcome<V, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RunOutcome")
            .field("succeeded", &self.result.is_ok())
            .finish_non_exhaustive()
    }
}

impl<Id, Task, InitFn, SuccessFn, FailureFn> AsyncView<Id, Task, InitFn, SuccessFn, FailureFn>
where
    Task: AsyncTask<Id>,
{
    fn launch<Context: TaskCtx>(&self, ctx: &mut Context, generation: u64) -> Context::RunHandle {
        ctx.with_id(RUN_ID, |ctx| {
            ctx.with_id(ViewId::new(generation), |ctx| {
                let proxy = MessageProxy::<RunOutcome<Task::Value, Task::Error>>::new(
                    ctx.proxy(),
                    ctx.view_path().into(),
                );
                tracing::trace!(generation, path = ?proxy.path(), "Launching async view task");
                let future = self.task.launch(&self.id);
                ctx.spawn(async move {
                    let result = future.await;
                    if let Err(err) = proxy.message(RunOutcome { result }) {
                        tracing::debug!(generation, "Async view outcome was not delivered: {err}");
                    }
                })
            })
        })
    }
}

impl<Id, Task, InitFn, SuccessFn, FailureFn> ViewMarker
    for AsyncView<Id, Task, InitFn, SuccessFn, FailureFn>
{
}
impl<State, Action, Context, Id, Task, InitFn, SuccessFn, FailureFn, IV, SV, FV>
    View<State, Action, Context> for AsyncView<Id, Task, InitFn, SuccessFn, FailureFn>
where
    State: 'static,
    Action: 'static,
    Context: TaskCtx + DisplayStateCtx<IV::Element, SV::Element, FV::Element>,
    Id: PartialEq + 'static,
    Task: AsyncTask<Id>,
    InitFn: Fn() -> IV + 'static,
    SuccessFn: Fn(Task::Value) -> SV + 'static,
    FailureFn: Fn(Task::Error) -> FV + 'static,
    IV: View<State, Action, Context>,
    SV: View<State, Action, Context>,
    FV: View<State, Action, Context>,
{
    type Element = Context::DisplayElement;

    type ViewState = AsyncViewState<
        IV,
        SV,
        FV,
        DisplayViewState<IV::ViewState, SV::ViewState, FV::ViewState>,
        Context::RunHandle,
    >;

    fn build(&self, ctx: &mut Context, app_state: &mut State) -> (Self::Element, Self::ViewState) {
        let holder = StateHolder::new((self.initial)());
        let (element, mounted) = ctx.with_id(CONTENT_ID, |ctx| {
            View::<State, Action, Context>::build(holder.current(), ctx, app_state)
        });
        let generation = 0;
        let run = self.launch(ctx, generation);
        (
            element,
            AsyncViewState {
                generation,
                holder,
                mounted,
                outgoing: None,
                run: Some(run),
            },
        )
    }

    fn rebuild(
        &self,
        prev: &Self,
        view_state: &mut Self::ViewState,
        ctx: &mut Context,
        element: Mut<'_, Self::Element>,
        app_state: &mut State,
    ) {
        if prev.id != self.id {
            if let Some(run) = view_state.run.take() {
                ctx.cancel(run);
            }
            view_state.generation = view_state.generation.wrapping_add(1);
            let replaced = view_state.holder.reset((self.initial)());
            // If the previous run settled without a rebuild since, its sub-view was never mounted.
            let mounted_view = view_state.outgoing.take().unwrap_or(replaced);
            ctx.with_id(CONTENT_ID, |ctx| {
                View::<State, Action, Context>::rebuild(
                    view_state.holder.current(),
                    &mounted_view,
                    &mut view_state.mounted,
                    ctx,
                    element,
                    app_state,
                );
            });
            view_state.run = Some(self.launch(ctx, view_state.generation));
            return;
        }

        let outgoing = view_state.outgoing.take();
        let mounted_view = outgoing.as_ref().unwrap_or(view_state.holder.current());
        ctx.with_id(CONTENT_ID, |ctx| {
            View::<State, Action, Context>::rebuild(
                view_state.holder.current(),
                mounted_view,
                &mut view_state.mounted,
                ctx,
                element,
                app_state,
            );
        });
    }

    fn teardown(
        &self,
        view_state: &mut Self::ViewState,
        ctx: &mut Context,
        element: Mut<'_, Self::Element>,
    ) {
        if let Some(run) = view_state.run.take() {
            ctx.cancel(run);
        }
        let mounted_view = view_state
            .outgoing
            .as_ref()
            .unwrap_or(view_state.holder.current());
        ctx.with_id(CONTENT_ID, |ctx| {
            View::<State, Action, Context>::teardown(
                mounted_view,
                &mut view_state.mounted,
                ctx,
                element,
            );
        });
    }

    fn message(
        &self,
        view_state: &mut Self::ViewState,
        message: &mut MessageCtx,
        element: Mut<'_, Self::Element>,
        app_state: &mut State,
    ) -> MessageResult<Action> {
        match message.take_first() {
            Some(CONTENT_ID) => {
                let mounted_view = view_state
                    .outgoing
                    .as_ref()
                    .unwrap_or(view_state.holder.current());
                View::<State, Action, Context>::message(
                    mounted_view,
                    &mut view_state.mounted,
                    message,
                    element,
                    app_state,
                )
            }
            Some(RUN_ID) => {
                let Some(generation) = message.take_first() else {
                    tracing::error!("Async view run message without a generation");
                    return MessageResult::Stale;
                };
                if generation.routing_id() != view_state.generation {
                    tracing::debug!(
                        stale = generation.routing_id(),
                        current = view_state.generation,
                        "Discarding the outcome of a superseded run"
                    );
                    return MessageResult::Stale;
                }
                if !message.remaining_path().is_empty() {
                    tracing::error!(
                        path = ?message.remaining_path(),
                        "Async view run message routed past its target"
                    );
                    return MessageResult::Stale;
                }
                let Some(outcome) = message.take_message::<RunOutcome<Task::Value, Task::Error>>()
                else {
                    tracing::error!(
                        generation = view_state.generation,
                        "Wrong message type sent to an async view run"
                    );
                    return MessageResult::Stale;
                };
                view_state.run = None;
                let RunOutcome { result } = *outcome;
                let outcome = match result {
                    Ok(value) => Ok((self.success)(value)),
                    Err(error) => Err((self.failure)(error)),
                };
                match view_state.holder.settle(outcome) {
                    Ok(replaced) => {
                        view_state.outgoing = Some(replaced);
                        MessageResult::RequestRebuild
                    }
                    Err(err) => {
                        tracing::error!(
                            generation = view_state.generation,
                            "Ignoring async view outcome: {err}"
                        );
                        MessageResult::Nop
                    }
                }
            }
            id => {
                tracing::error!(?id, "Message sent to an unknown child of an async view");
                MessageResult::Stale
            }
        }
    }
}

fn never_fails(never: Infallible) -> EmptyView {
    match never {}
}

type DefaultInitial = fn() -> EmptyView;
type NoFailure = fn(Infallible) -> EmptyView;

/// An [`AsyncView`] for a task which can't fail, and has no identity.
///
/// `task` is run once when the view is mounted, and `success` creates the view shown for its
/// value. Nothing is shown before that, unless an [`initial`](AsyncView::initial) view is
/// given.
///
/// # Examples
///
/// ```ignore
/// async_view(
///     || async {
///         tokio::time::sleep(Duration::from_secs(2)).await;
///         "Hello world"
///     },
///     label,
/// )
/// .initial(|| label("Loading..."))
/// ```
pub fn async_view<Task, Fut, SuccessFn, SV>(
    task: Task,
    success: SuccessFn,
) -> AsyncView<(), NeverFails<impl Fn(&()) -> Fut + 'static>, DefaultInitial, SuccessFn, NoFailure>
where
    Task: Fn() -> Fut + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: Send + 'static,
    SuccessFn: Fn(Fut::Output) -> SV + 'static,
{
    let initial: DefaultInitial = empty;
    let failure: NoFailure = never_fails;
    AsyncView::new((), NeverFails(move |(): &()| task()), initial, success, failure)
}

/// An [`AsyncView`] for a task which can fail, and has no identity.
///
/// `task` is run once when the view is mounted. If its future resolves to `Ok`, the view
/// created by `success` is shown, otherwise the one created by `failure`.
pub fn try_async_view<Task, Fut, Value, Error, SuccessFn, FailureFn, SV, FV>(
    task: Task,
    success: SuccessFn,
    failure: FailureFn,
) -> AsyncView<(), Fallible<impl Fn(&()) -> Fut + 'static>, DefaultInitial, SuccessFn, FailureFn>
where
    Task: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<Value, Error>> + Send + 'static,
    Value: Send + 'static,
    Error: Send + 'static,
    SuccessFn: Fn(Value) -> SV + 'static,
    FailureFn: Fn(Error) -> FV + 'static,
{
    let initial: DefaultInitial = empty;
    AsyncView::new((), Fallible(move |(): &()| task()), initial, success, failure)
}

/// An [`AsyncView`] for a task which can't fail, and is run again whenever `id` changes.
///
/// `task` receives the identity it is run for.
pub fn async_view_with_id<Id, Task, Fut, SuccessFn, SV>(
    id: Id,
    task: Task,
    success: SuccessFn,
) -> AsyncView<Id, NeverFails<Task>, DefaultInitial, SuccessFn, NoFailure>
where
    Id: PartialEq + 'static,
    Task: Fn(&Id) -> Fut + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: Send + 'static,
    SuccessFn: Fn(Fut::Output) -> SV + 'static,
{
    let initial: DefaultInitial = empty;
    let failure: NoFailure = never_fails;
    AsyncView::new(id, NeverFails(task), initial, success, failure)
}

/// An [`AsyncView`] for a task which can fail, and is run again whenever `id` changes.
///
/// `task` receives the identity it is run for.
///
/// # Examples
///
/// ```ignore
/// try_async_view_with_id(
///     state.user_id,
///     |user_id| fetch_user_name(*user_id),
///     |name| label(name),
///     |error| label(format!("Failed to load user: {error}")),
/// )
/// .initial(|| label("Loading..."))
/// ```
pub fn try_async_view_with_id<Id, Task, Fut, Value, Error, SuccessFn, FailureFn, SV, FV>(
    id: Id,
    task: Task,
    success: SuccessFn,
    failure: FailureFn,
) -> AsyncView<Id, Fallible<Task>, DefaultInitial, SuccessFn, FailureFn>
where
    Id: PartialEq + 'static,
    Task: Fn(&Id) -> Fut + 'static,
    Fut: Future<Output = Result<Value, Error>> + Send + 'static,
    Value: Send + 'static,
    Error: Send + 'static,
    SuccessFn: Fn(Value) -> SV + 'static,
    FailureFn: Fn(Error) -> FV + 'static,
{
    let initial: DefaultInitial = empty;
    AsyncView::new(id, Fallible(task), initial, success, failure)
}
