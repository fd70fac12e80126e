// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! The three-way display state of an [`AsyncView`](crate::AsyncView).

use crate::{MessageCtx, MessageResult, Mut, View, ViewElement, ViewId, ViewMarker, ViewPathTracker};

/// Which of the three sub-views of an [`AsyncView`](crate::AsyncView) is active.
///
/// The same type is used for the sub-views themselves, for their view states and for their
/// elements, in the same way that a statically typed "one of" view is.
///
/// When the variants are all views, `DisplayState` is itself a [`View`], which renders the
/// active variant.
/// Changing variant between rebuilds tears down the previous sub-view and replaces its
/// element (see [`DisplayStateCtx`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DisplayState<I, S, F> {
    /// The task for the current identity hasn't completed yet.
    Initial(I),
    /// The task completed successfully.
    Success(S),
    /// The task failed.
    Failure(F),
}

impl<I, S, F> DisplayState<I, S, F> {
    /// Returns `true` if this is the [`Initial`](Self::Initial) variant.
    pub fn is_initial(&self) -> bool {
        matches!(self, Self::Initial(_))
    }

    /// Returns `true` if this is the [`Success`](Self::Success) variant.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` if this is the [`Failure`](Self::Failure) variant.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// The value of the success variant, if active.
    pub fn success(&self) -> Option<&S> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    /// The value of the failure variant, if active.
    pub fn failure(&self) -> Option<&F> {
        match self {
            Self::Failure(value) => Some(value),
            _ => None,
        }
    }

    /// Converts from `&DisplayState<I, S, F>` to `DisplayState<&I, &S, &F>`.
    pub fn as_ref(&self) -> DisplayState<&I, &S, &F> {
        match self {
            Self::Initial(value) => DisplayState::Initial(value),
            Self::Success(value) => DisplayState::Success(value),
            Self::Failure(value) => DisplayState::Failure(value),
        }
    }
}

/// The host capability for mounting the active variant of a [`DisplayState`] view.
///
/// `I`, `S` and `F` are the element types of the initial, success and failure sub-views.
/// The host wraps whichever of them is active in a single
/// [`DisplayElement`](DisplayStateCtx::DisplayElement), so that the parent of the view
/// sees one stable element type.
pub trait DisplayStateCtx<I: ViewElement, S: ViewElement, F: ViewElement>:
    ViewPathTracker
{
    /// Element wrapper which holds the element of the active variant.
    type DisplayElement: ViewElement;

    /// Casts the display element `elem` to the initial variant.
    /// `f` needs to be invoked with that inner `ViewElement`
    fn with_downcast_initial(elem: &mut Mut<'_, Self::DisplayElement>, f: impl FnOnce(Mut<'_, I>));

    /// Casts the display element `elem` to the success variant.
    /// `f` needs to be invoked with that inner `ViewElement`
    fn with_downcast_success(elem: &mut Mut<'_, Self::DisplayElement>, f: impl FnOnce(Mut<'_, S>));

    /// Casts the display element `elem` to the failure variant.
    /// `f` needs to be invoked with that inner `ViewElement`
    fn with_downcast_failure(elem: &mut Mut<'_, Self::DisplayElement>, f: impl FnOnce(Mut<'_, F>));

    /// Creates the wrapping element, this is used in `View::build` to wrap the inner element.
    fn upcast_display_element(&mut self, elem: DisplayState<I, S, F>) -> Self::DisplayElement;

    /// Replaces the wrapped element after the active variant changed in `View::rebuild`.
    fn update_display_element_mut(
        elem_mut: &mut Mut<'_, Self::DisplayElement>,
        new_elem: DisplayState<I, S, F>,
    );
}

/// The view state of a [`DisplayState`] view.
#[derive(Debug)]
pub struct DisplayViewState<I, S, F> {
    /// Incremented whenever the active variant changes, so messages to a removed
    /// sub-view are recognised as stale.
    generation: u64,
    inner: DisplayState<I, S, F>,
}

impl<I, S, F> DisplayViewState<I, S, F> {
    /// How many times the active variant has been replaced.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

type BuiltVariant<State, Action, Context, I, S, F> = (
    DisplayState<
        <I as View<State, Action, Context>>::Element,
        <S as View<State, Action, Context>>::Element,
        <F as View<State, Action, Context>>::Element,
    >,
    DisplayState<
        <I as View<State, Action, Context>>::ViewState,
        <S as View<State, Action, Context>>::ViewState,
        <F as View<State, Action, Context>>::ViewState,
    >,
);

fn build_variant<State, Action, Context, I, S, F>(
    view: &DisplayState<I, S, F>,
    ctx: &mut Context,
    app_state: &mut State,
) -> BuiltVariant<State, Action, Context, I, S, F>
where
    Context: ViewPathTracker,
    I: View<State, Action, Context>,
    S: View<State, Action, Context>,
    F: View<State, Action, Context>,
{
    match view {
        DisplayState::Initial(v) => {
            let (element, state) = v.build(ctx, app_state);
            (DisplayState::Initial(element), DisplayState::Initial(state))
        }
        DisplayState::Success(v) => {
            let (element, state) = v.build(ctx, app_state);
            (DisplayState::Success(element), DisplayState::Success(state))
        }
        DisplayState::Failure(v) => {
            let (element, state) = v.build(ctx, app_state);
            (DisplayState::Failure(element), DisplayState::Failure(state))
        }
    }
}

impl<I, S, F> ViewMarker for DisplayState<I, S, F> {}
impl<State, Action, Context, I, S, F> View<State, Action, Context> for DisplayState<I, S, F>
where
    State: 'static,
    Action: 'static,
    Context: DisplayStateCtx<I::Element, S::Element, F::Element>,
    I: View<State, Action, Context>,
    S: View<State, Action, Context>,
    F: View<State, Action, Context>,
{
    type Element = Context::DisplayElement;

    type ViewState = DisplayViewState<I::ViewState, S::ViewState, F::ViewState>;

    fn build(&self, ctx: &mut Context, app_state: &mut State) -> (Self::Element, Self::ViewState) {
        let generation = 0;
        let (element, inner) = ctx.with_id(ViewId::new(generation), |ctx| {
            build_variant::<State, Action, Context, I, S, F>(self, ctx, app_state)
        });
        (
            ctx.upcast_display_element(element),
            DisplayViewState { generation, inner },
        )
    }

    fn rebuild(
        &self,
        prev: &Self,
        view_state: &mut Self::ViewState,
        ctx: &mut Context,
        mut element: Mut<'_, Self::Element>,
        app_state: &mut State,
    ) {
        let id = ViewId::new(view_state.generation);
        // Happy path: the same variant is active.
        match (self, prev, &mut view_state.inner) {
            (Self::Initial(this), Self::Initial(prev), DisplayState::Initial(state)) => {
                ctx.with_id(id, |ctx| {
                    Context::with_downcast_initial(&mut element, |element| {
                        this.rebuild(prev, state, ctx, element, app_state);
                    });
                });
                return;
            }
            (Self::Success(this), Self::Success(prev), DisplayState::Success(state)) => {
                ctx.with_id(id, |ctx| {
                    Context::with_downcast_success(&mut element, |element| {
                        this.rebuild(prev, state, ctx, element, app_state);
                    });
                });
                return;
            }
            (Self::Failure(this), Self::Failure(prev), DisplayState::Failure(state)) => {
                ctx.with_id(id, |ctx| {
                    Context::with_downcast_failure(&mut element, |element| {
                        this.rebuild(prev, state, ctx, element, app_state);
                    });
                });
                return;
            }
            _ => (),
        }

        // The variant has changed: tear down the old sub-view and mount the new one.
        ctx.with_id(id, |ctx| match (prev, &mut view_state.inner) {
            (Self::Initial(prev), DisplayState::Initial(state)) => {
                Context::with_downcast_initial(&mut element, |element| {
                    prev.teardown(state, ctx, element);
                });
            }
            (Self::Success(prev), DisplayState::Success(state)) => {
                Context::with_downcast_success(&mut element, |element| {
                    prev.teardown(state, ctx, element);
                });
            }
            (Self::Failure(prev), DisplayState::Failure(state)) => {
                Context::with_downcast_failure(&mut element, |element| {
                    prev.teardown(state, ctx, element);
                });
            }
            _ => unreachable!("the view state must match the previous display state"),
        });

        view_state.generation = view_state.generation.wrapping_add(1);
        let (new_element, inner) = ctx.with_id(ViewId::new(view_state.generation), |ctx| {
            build_variant::<State, Action, Context, I, S, F>(self, ctx, app_state)
        });
        view_state.inner = inner;
        Context::update_display_element_mut(&mut element, new_element);
    }

    fn teardown(
        &self,
        view_state: &mut Self::ViewState,
        ctx: &mut Context,
        mut element: Mut<'_, Self::Element>,
    ) {
        ctx.with_id(ViewId::new(view_state.generation), |ctx| {
            match (self, &mut view_state.inner) {
                (Self::Initial(v), DisplayState::Initial(state)) => {
                    Context::with_downcast_initial(&mut element, |element| {
                        v.teardown(state, ctx, element);
                    });
                }
                (Self::Success(v), DisplayState::Success(state)) => {
                    Context::with_downcast_success(&mut element, |element| {
                        v.teardown(state, ctx, element);
                    });
                }
                (Self::Failure(v), DisplayState::Failure(state)) => {
                    Context::with_downcast_failure(&mut element, |element| {
                        v.teardown(state, ctx, element);
                    });
                }
                _ => unreachable!("the view state must match the display state"),
            }
        });
    }

    fn message(
        &self,
        view_state: &mut Self::ViewState,
        message: &mut MessageCtx,
        mut element: Mut<'_, Self::Element>,
        app_state: &mut State,
    ) -> MessageResult<Action> {
        let Some(start) = message.take_first() else {
            unreachable!("Messages to a display state are always routed to its active variant");
        };
        if start.routing_id() != view_state.generation {
            // The message was sent to a sub-view which has since been replaced.
            return MessageResult::Stale;
        }
        let mut result = MessageResult::Nop;
        match (self, &mut view_state.inner) {
            (Self::Initial(v), DisplayState::Initial(state)) => {
                Context::with_downcast_initial(&mut element, |element| {
                    result = v.message(state, message, element, app_state);
                });
            }
            (Self::Success(v), DisplayState::Success(state)) => {
                Context::with_downcast_success(&mut element, |element| {
                    result = v.message(state, message, element, app_state);
                });
            }
            (Self::Failure(v), DisplayState::Failure(state)) => {
                Context::with_downcast_failure(&mut element, |element| {
                    result = v.message(state, message, element, app_state);
                });
            }
            _ => unreachable!("the view state must match the display state"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::DisplayState;

    type State = DisplayState<&'static str, u32, &'static str>;

    #[test]
    fn exactly_one_variant_is_active() {
        let states: [State; 3] = [
            DisplayState::Initial("Loading"),
            DisplayState::Success(7),
            DisplayState::Failure("Failure"),
        ];
        for state in states {
            let active = [state.is_initial(), state.is_success(), state.is_failure()];
            assert_eq!(active.iter().filter(|x| **x).count(), 1);
        }
    }

    #[test]
    fn accessors_match_variant() {
        let success: State = DisplayState::Success(7);
        assert_eq!(success.success(), Some(&7));
        assert_eq!(success.failure(), None);
        assert_eq!(success.as_ref(), DisplayState::Success(&7));

        let failure: State = DisplayState::Failure("Failure");
        assert_eq!(failure.failure(), Some(&"Failure"));
        assert_eq!(failure.success(), None);
    }
}
