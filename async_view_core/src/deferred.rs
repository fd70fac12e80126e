// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Running work outside of the view tree, and sending its results back in.

use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt::{Debug, Display};
use core::future::Future;
use core::marker::PhantomData;

use crate::{AnyMessage, DynMessage, ViewId, ViewPathTracker};

/// A `RawProxy` allows sending messages to a specific view path in the view tree.
///
/// This is the type-erased form of [`MessageProxy`], which is what views hand out to tasks.
pub trait RawProxy: Send + Sync + 'static {
    /// Send a `message` to the view at `path` in this driver.
    ///
    /// Note that it is only valid to send messages to views which expect them.
    ///
    /// # Errors
    ///
    /// This method may error if the driver is no longer running.
    fn send_message(&self, path: Arc<[ViewId]>, message: DynMessage) -> Result<(), ProxyError>;

    /// Get the debug formatter for this proxy type.
    fn dyn_debug(&self) -> &dyn Debug;
}

impl Debug for dyn RawProxy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.dyn_debug().fmt(f)
    }
}

/// A way to send messages of type `M` to the view at a fixed path.
pub struct MessageProxy<M: AnyMessage> {
    proxy: Arc<dyn RawProxy>,
    path: Arc<[ViewId]>,
    message: PhantomData<fn(M)>,
}

impl<M: AnyMessage> Debug for MessageProxy<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MessageProxy")
            .field("proxy", &self.proxy)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl<M: AnyMessage> MessageProxy<M> {
    /// Create a new `MessageProxy` which sends to the view at `path`.
    pub fn new(proxy: Arc<dyn RawProxy>, path: Arc<[ViewId]>) -> Self {
        Self {
            proxy,
            path,
            message: PhantomData,
        }
    }

    /// The view path messages are sent to.
    pub fn path(&self) -> &[ViewId] {
        &self.path
    }

    /// Send `message` to the view which created this proxy.
    ///
    /// # Errors
    ///
    /// If the driver has stopped; the message is returned inside the error.
    pub fn message(&self, message: M) -> Result<(), ProxyError> {
        self.proxy
            .send_message(self.path.clone(), Box::new(message))
    }
}

/// The potential error conditions from a [`RawProxy`].
#[derive(Debug)]
#[non_exhaustive]
pub enum ProxyError {
    /// The underlying driver (such as an event loop or a message channel) is no longer running.
    ///
    /// Contains the message which could not be delivered.
    DriverFinished(DynMessage),
}

impl Display for ProxyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::DriverFinished(message) => {
                write!(f, "the driver finished before {message:?} could be delivered")
            }
        }
    }
}

impl core::error::Error for ProxyError {}

/// The context capability needed to run asynchronous work for a view.
///
/// A run is tied to the view which spawned it: the view holds on to the
/// [`RunHandle`](TaskCtx::RunHandle), and cancels it when the run is superseded or the view
/// is torn down.
pub trait TaskCtx: ViewPathTracker {
    /// A handle to a spawned run.
    type RunHandle;

    /// The proxy through which runs send their results back to the view tree.
    fn proxy(&mut self) -> Arc<dyn RawProxy>;

    /// Start running `future` in the background.
    ///
    /// This must not poll `future` before returning.
    fn spawn<F>(&mut self, future: F) -> Self::RunHandle
    where
        F: Future<Output = ()> + Send + 'static;

    /// Cancel the run behind `handle`.
    ///
    /// Cancellation is best-effort: a run which has already sent its result may still
    /// have that result delivered, and views are expected to discard it.
    fn cancel(&mut self, handle: Self::RunHandle);
}
