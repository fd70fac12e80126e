// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

use std::io;

use tokio::runtime::Runtime;

use crate::core::View;
use crate::{Driver, Node, ViewCtx};

/// Runs an app whose view tree may contain async views, on a runtime it creates.
///
/// For more control (such as driving several apps on one runtime), use
/// [`into_driver_in`](Self::into_driver_in).
pub struct AsyncApp<State, Logic> {
    state: State,
    logic: Logic,
    worker_threads: Option<usize>,
}

impl<State, Logic, V> AsyncApp<State, Logic>
where
    State: 'static,
    Logic: FnMut(&mut State) -> V,
    V: View<State, (), ViewCtx, Element = Node>,
{
    /// Create an app from its initial `state`, and the `logic` which creates its view tree.
    pub fn new(state: State, logic: Logic) -> Self {
        Self {
            state,
            logic,
            worker_threads: None,
        }
    }

    /// Set the number of worker threads of the runtime created by
    /// [`run_until`](Self::run_until).
    ///
    /// By default, this is the number of cores available to the system.
    pub fn worker_threads(mut self, worker_threads: usize) -> Self {
        self.worker_threads = Some(worker_threads);
        self
    }

    /// Mount the view tree, spawning its tasks onto `runtime`.
    pub fn into_driver_in(self, runtime: &Runtime) -> Driver<State, Logic, V> {
        Driver::new(self.state, self.logic, runtime.handle().clone())
    }

    /// Run the app until `done` returns `true` for the app state and the root element, then
    /// unmount it and return the app state.
    ///
    /// # Errors
    ///
    /// If the runtime couldn't be created.
    pub fn run_until(self, done: impl FnMut(&State, &Node) -> bool) -> io::Result<State> {
        let runtime = self.build_runtime()?;
        let mut driver = self.into_driver_in(&runtime);
        runtime.block_on(driver.dispatch_until(done));
        Ok(driver.unmount())
    }

    fn build_runtime(&self) -> io::Result<Runtime> {
        let mut builder = tokio::runtime::Builder::new_multi_thread();
        builder.enable_time();
        if let Some(worker_threads) = self.worker_threads {
            builder.worker_threads(worker_threads);
        }
        builder.build()
    }
}

impl<State, Logic> std::fmt::Debug for AsyncApp<State, Logic> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncApp")
            .field("worker_threads", &self.worker_threads)
            .finish_non_exhaustive()
    }
}
