// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

use core::fmt::Display;

use crate::DisplayState;

/// View-owned storage for the current [`DisplayState`] of an [`AsyncView`](crate::AsyncView).
///
/// The holder starts out in [`DisplayState::Initial`], and is settled exactly once by the run
/// for the current identity. `settle` is the only mutation a run can cause; the crate-private
/// `reset` is reserved for identity restarts, which put the holder back to `Initial`.
/// Code outside this crate cannot set the state arbitrarily.
#[derive(Debug)]
pub struct StateHolder<I, S, F> {
    current: DisplayState<I, S, F>,
}

impl<I, S, F> StateHolder<I, S, F> {
    /// Create a holder in the `Initial` state.
    pub fn new(initial: I) -> Self {
        Self {
            current: DisplayState::Initial(initial),
        }
    }

    /// The current display state.
    pub fn current(&self) -> &DisplayState<I, S, F> {
        &self.current
    }

    /// Whether the run for the current identity has completed.
    pub fn is_settled(&self) -> bool {
        !self.current.is_initial()
    }

    /// Take the current display state out of this holder.
    pub fn into_inner(self) -> DisplayState<I, S, F> {
        self.current
    }

    /// Record the outcome of the current run.
    ///
    /// Returns the `Initial` state which was replaced.
    ///
    /// # Errors
    ///
    /// If the holder was already settled, in which case it is left unchanged.
    pub(crate) fn settle(
        &mut self,
        outcome: Result<S, F>,
    ) -> Result<DisplayState<I, S, F>, SettleError> {
        if self.is_settled() {
            return Err(SettleError::AlreadySettled);
        }
        let next = match outcome {
            Ok(success) => DisplayState::Success(success),
            Err(failure) => DisplayState::Failure(failure),
        };
        Ok(core::mem::replace(&mut self.current, next))
    }

    /// Go back to the `Initial` state, returning the state which was replaced.
    pub(crate) fn reset(&mut self, initial: I) -> DisplayState<I, S, F> {
        core::mem::replace(&mut self.current, DisplayState::Initial(initial))
    }
}

/// The error returned when settling a [`StateHolder`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettleError {
    /// The run for the current identity already has an outcome.
    AlreadySettled,
}

impl Display for SettleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AlreadySettled => f.write_str("the current run was already settled"),
        }
    }
}

impl core::error::Error for SettleError {}
