// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

use core::convert::Infallible;
use core::future::Future;

use futures::FutureExt;
use futures::future::Map;

/// An asynchronous operation run by an [`AsyncView`](crate::AsyncView), parameterised by
/// the view's identity.
///
/// This abstracts over the two shapes of task the constructors accept:
/// [`Fallible`] tasks resolve to a `Result`, whilst [`NeverFails`] tasks resolve to a plain
/// value and have [`Infallible`] as their error type, so that the failure branch
/// can't be reached.
pub trait AsyncTask<Id>: 'static {
    /// The value produced by a successful run.
    type Value: Send + 'static;
    /// The error produced by a failed run.
    type Error: Send + 'static;
    /// The future for a single run.
    type Future: Future<Output = Result<Self::Value, Self::Error>> + Send + 'static;

    /// Create the future for a run with identity `id`.
    fn launch(&self, id: &Id) -> Self::Future;
}

/// A task whose future resolves to a `Result`.
#[derive(Clone, Copy, Debug)]
pub struct Fallible<F>(pub F);

impl<Id, F, Fut, Value, Error> AsyncTask<Id> for Fallible<F>
where
    F: Fn(&Id) -> Fut + 'static,
    Fut: Future<Output = Result<Value, Error>> + Send + 'static,
    Value: Send + 'static,
    Error: Send + 'static,
{
    type Value = Value;
    type Error = Error;
    type Future = Fut;

    fn launch(&self, id: &Id) -> Self::Future {
        (self.0)(id)
    }
}

/// A task whose future resolves to its value directly.
#[derive(Clone, Copy, Debug)]
pub struct NeverFails<F>(pub F);

type Succeed<T> = fn(T) -> Result<T, Infallible>;

impl<Id, F, Fut> AsyncTask<Id> for NeverFails<F>
where
    F: Fn(&Id) -> Fut + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: Send + 'static,
{
    type Value = Fut::Output;
    type Error = Infallible;
    type Future = Map<Fut, Succeed<Fut::Output>>;

    fn launch(&self, id: &Id) -> Self::Future {
        let succeed: Succeed<Fut::Output> = Ok;
        (self.0)(id).map(succeed)
    }
}
