// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

use crate::core::{ViewElement, ViewId};

/// What a [`Node`] renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Nothing, but the node still holds its place in the tree.
    Placeholder,
    /// A line of text.
    Text(String),
}

/// A retained element in the tree built by this crate's views.
///
/// Besides its content, a node remembers the view path it was built at, and how many times
/// the sub-view it holds has been swapped out (for example when an
/// [`AsyncView`](crate::core::AsyncView) moves from its initial view to its success view).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    content: Content,
    view_path: Vec<ViewId>,
    replacements: u32,
}

impl ViewElement for Node {
    type Mut<'a> = &'a mut Self;
}

impl Node {
    pub(crate) fn new(content: Content, view_path: Vec<ViewId>) -> Self {
        Self {
            content,
            view_path,
            replacements: 0,
        }
    }

    /// The content of this node.
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// The text of this node, or `None` for a placeholder.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(text),
            Content::Placeholder => None,
        }
    }

    /// Whether this node is a placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.content == Content::Placeholder
    }

    /// The view path of the view which built the current content.
    pub fn view_path(&self) -> &[ViewId] {
        &self.view_path
    }

    /// How many times the content of this node was replaced by a different view.
    pub fn replacements(&self) -> u32 {
        self.replacements
    }

    pub(crate) fn set_text(&mut self, text: &str) {
        match &mut self.content {
            Content::Text(current) => text.clone_into(current),
            Content::Placeholder => self.content = Content::Text(text.to_owned()),
        }
    }

    /// Take on the content of `new`, which was just built to replace this node's view.
    pub(crate) fn replace(&mut self, new: Self) {
        self.content = new.content;
        self.view_path = new.view_path;
        self.replacements += 1;
    }
}
