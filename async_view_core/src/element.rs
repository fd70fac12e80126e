// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! The types which can be used as elements in a [`View`](crate::View)

/// A type which can be used as the `Element` associated type for a [`View`](crate::View).
///
/// Hosts will usually implement this for their retained node type, with `Mut<'a>` being a
/// mutable reference to that node.
pub trait ViewElement {
    /// The reference form of this `Element` for editing.
    ///
    /// This is provided to [`View::rebuild`](crate::View::rebuild),
    /// [`View::teardown`](crate::View::teardown) and [`View::message`](crate::View::message).
    type Mut<'a>;
}

/// This alias is syntax sugar to avoid the elaborate expansion of
/// `<Self::Element as ViewElement>::Mut<'el>` in the View trait when implementing it.
pub type Mut<'el, E> = <E as ViewElement>::Mut<'el>;
