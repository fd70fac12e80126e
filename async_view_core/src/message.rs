// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Message routing and type erasure primitives.

use alloc::boxed::Box;
use core::any::Any;
use core::fmt::Debug;

/// The possible outcomes from a [`View::message`]
///
/// [`View::message`]: crate::View::message
#[derive(Debug, Default)]
pub enum MessageResult<Action> {
    /// An action for a parent message handler to use.
    Action(Action),
    /// This message's handler needs a rebuild to happen.
    ///
    /// The host should rebuild the view tree against itself, without rerunning the app logic.
    /// `AsyncView` uses this to swap in the sub-view for a completed task.
    RequestRebuild,
    #[default]
    /// This event had no impact on the app state, or the impact it did have
    /// does not require the element tree to be recreated.
    Nop,
    /// The view this message was being routed to no longer exists.
    Stale,
}

/// A type that implements [`Any`], [`Debug`] and [`Send`].
///
/// The `Debug` requirement allows inspecting messages which were sent to the wrong place.
/// Messages have to be `Send`, as they are usually produced on a runtime's worker threads.
pub trait AnyMessage: Any + Debug + Send {}
impl<T> AnyMessage for T where T: Any + Debug + Send {}

/// A dynamically typed message for the [`View`] trait.
///
/// [`View`]: crate::View
pub type DynMessage = Box<dyn AnyMessage>;

impl dyn AnyMessage {
    /// Access the actual type of this [`DynMessage`].
    ///
    /// ## Errors
    ///
    /// If the message contained within `self` is not of type `T`, returns `self`
    /// (so that e.g. a different type can be used)
    pub fn downcast<T: AnyMessage>(self: Box<Self>) -> Result<Box<T>, Box<Self>> {
        // The panic is unreachable
        #![allow(clippy::missing_panics_doc, reason = "`is` was checked first")]
        if self.is::<T>() {
            Ok((self as Box<dyn Any>)
                .downcast::<T>()
                .expect("`is` should correspond with `downcast`"))
        } else {
            Err(self)
        }
    }

    /// Returns `true` if the inner type is the same as `T`.
    pub fn is<T: AnyMessage>(&self) -> bool {
        let this: &dyn Any = self;
        this.is::<T>()
    }
}

#[cfg(test)]
mod tests {
    use core::fmt::Debug;

    use alloc::boxed::Box;

    use crate::DynMessage;

    struct Outcome(String);

    impl Debug for Outcome {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.write_str("An outcome")
        }
    }

    #[derive(Debug)]
    struct OtherOutcome;

    #[test]
    /// Downcasting a message to the correct type should work
    fn message_downcast() {
        let message: DynMessage = Box::new(Outcome("Hello world".to_string()));
        let result: Box<Outcome> = message.downcast().unwrap();
        assert_eq!(&result.0, "Hello world");
    }

    #[test]
    /// Downcasting a message to the wrong type shouldn't panic, and gives the message back
    fn message_downcast_wrong_type() {
        let message: DynMessage = Box::new(Outcome("Hello world".to_string()));
        let message = message.downcast::<OtherOutcome>().unwrap_err();
        assert!(message.is::<Outcome>());
    }

    #[test]
    fn message_debug() {
        let message: DynMessage = Box::new(Outcome(String::new()));
        let debug_result = format!("{message:?}");
        assert!(debug_result.contains("An outcome"));
    }
}
