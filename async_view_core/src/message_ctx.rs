// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::{AnyMessage, DynMessage, ViewId};

/// Routing state for a message travelling down the view tree, passed to
/// [`View::message`](crate::View::message).
///
/// The target path is consumed one id at a time: each view takes the id of the child the
/// message belongs to, and the view which finds the path exhausted is the recipient.
/// For an async view, the recipient of a run's outcome is the async view itself, and the
/// outcome is only taken if the generation in the path is still current.
#[derive(Debug)]
pub struct MessageCtx {
    target: Vec<ViewId>,
    cursor: usize,
    message: Option<DynMessage>,
}

impl MessageCtx {
    /// Start routing `message` to the view at `target`.
    ///
    /// This is called by hosts, not by views.
    pub fn new(target: Vec<ViewId>, message: DynMessage) -> Self {
        Self {
            target,
            cursor: 0,
            message: Some(message),
        }
    }

    /// Take the next id of the target path.
    ///
    /// Returns `None` if the calling view is the recipient.
    pub fn take_first(&mut self) -> Option<ViewId> {
        let id = *self.target.get(self.cursor)?;
        self.cursor += 1;
        Some(id)
    }

    /// The part of the target path which has not been taken yet.
    pub fn remaining_path(&self) -> &[ViewId] {
        &self.target[self.cursor..]
    }

    /// Take the message if it is a `T`.
    ///
    /// A message of another type is left in place, so that the host can report it.
    ///
    /// # Panics
    ///
    /// If the message was already taken.
    /// In debug builds, also if the target path has not been fully consumed.
    #[track_caller]
    pub fn take_message<T: AnyMessage>(&mut self) -> Option<Box<T>> {
        debug_assert!(
            self.remaining_path().is_empty(),
            "Message taken before reaching its target, {} ids remain",
            self.remaining_path().len()
        );
        let Some(message) = self.message.take() else {
            panic!("Message was taken twice.");
        };
        message.downcast::<T>().map_or_else(
            |message| {
                self.message = Some(message);
                None
            },
            Some,
        )
    }

    /// Consume the context, returning the target path and the message if nobody took it.
    ///
    /// Hosts reuse the path allocation for the next message.
    pub fn finish(self) -> (Vec<ViewId>, Option<DynMessage>) {
        (self.target, self.message)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec;

    use crate::{MessageCtx, ViewId};

    #[test]
    fn path_is_consumed_in_order() {
        let mut ctx = MessageCtx::new(vec![ViewId::new(1), ViewId::new(7)], Box::new(()));
        assert_eq!(ctx.take_first(), Some(ViewId::new(1)));
        assert_eq!(ctx.remaining_path(), [ViewId::new(7)]);
        assert_eq!(ctx.take_first(), Some(ViewId::new(7)));
        assert!(ctx.remaining_path().is_empty());
        assert_eq!(ctx.take_first(), None);
    }

    #[test]
    fn mismatched_type_stays_in_place() {
        let mut ctx = MessageCtx::new(vec![], Box::new("outcome"));
        assert!(ctx.take_message::<u32>().is_none());
        assert_eq!(*ctx.take_message::<&str>().unwrap(), "outcome");
    }

    #[test]
    #[should_panic(expected = "Message was taken twice.")]
    fn second_take_panics() {
        let mut ctx = MessageCtx::new(vec![], Box::new(()));
        ctx.take_message::<()>();
        ctx.take_message::<()>();
    }

    #[test]
    #[cfg_attr(not(debug_assertions), ignore = "relies on debug assertions")]
    #[should_panic(expected = "Message taken before reaching its target")]
    fn early_take_panics() {
        let mut ctx = MessageCtx::new(vec![ViewId::new(3)], Box::new(()));
        ctx.take_message::<()>();
    }

    #[test]
    fn finish_returns_untaken_message() {
        let mut ctx = MessageCtx::new(vec![ViewId::new(4)], Box::new(10_u32));
        ctx.take_first();
        let (path, message) = ctx.finish();
        assert_eq!(path, [ViewId::new(4)]);
        assert!(message.unwrap().is::<u32>());
    }
}
