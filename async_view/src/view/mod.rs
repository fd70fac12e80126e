// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Views which build [`Node`](crate::Node) elements.
//!
//! The async view itself, its constructors and [`empty`](crate::core::empty) live in
//! [`core`](crate::core), and work with these views through [`ViewCtx`](crate::ViewCtx).

mod label;
pub use label::{Label, label};
