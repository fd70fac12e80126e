// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Five async views side by side: with and without a loading view, succeeding and failing,
//! and one whose outcome is picked at random.
//!
//! Each view is mounted in its own driver, and all of them share one runtime.

use std::error::Error;
use std::fmt;
use std::future::Future;
use std::time::Duration;

use async_view::core::{async_view, try_async_view};
use async_view::view::{Label, label};
use async_view::{AsyncApp, Node, try_init_tracing};
use tokio::time::sleep;

/// Resolve to `value` after `seconds`.
fn delayed<T: Send>(seconds: u64, value: T) -> impl Future<Output = T> + Send {
    async move {
        sleep(Duration::from_secs(seconds)).await;
        value
    }
}

#[derive(Debug)]
struct Failure;

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("The operation couldn't be completed.")
    }
}

impl Error for Failure {}

#[derive(Debug, Clone, Copy)]
enum Greeting {
    Hello,
    Goodbye,
}

impl Greeting {
    fn random() -> Self {
        if rand::random() {
            Self::Hello
        } else {
            Self::Goodbye
        }
    }
}

fn loading_view() -> Label {
    label("Loading")
}

fn success_view(value: &str) -> Label {
    label(format!("Success: {value}"))
}

fn failure_view(error: Failure) -> Label {
    label(format!("Failure: {error}"))
}

/// Whether an async view has replaced its initial view with its outcome.
fn settled((): &(), root: &Node) -> bool {
    root.replacements() > 0
}

fn main() -> Result<(), Box<dyn Error>> {
    try_init_tracing()?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_time()
        .build()?;

    let mut plain = AsyncApp::new((), |_: &mut ()| {
        async_view(|| delayed(2, "Hello world"), success_view)
    })
    .into_driver_in(&runtime);

    let mut with_loading = AsyncApp::new((), |_: &mut ()| {
        async_view(|| delayed(2, "Hello world"), success_view).initial(loading_view)
    })
    .into_driver_in(&runtime);

    let mut failing = AsyncApp::new((), |_: &mut ()| {
        try_async_view(
            || delayed(2, Err::<&str, _>(Failure)),
            success_view,
            failure_view,
        )
    })
    .into_driver_in(&runtime);

    let mut failing_with_loading = AsyncApp::new((), |_: &mut ()| {
        try_async_view(
            || delayed(2, Err::<&str, _>(Failure)),
            success_view,
            failure_view,
        )
        .initial(loading_view)
    })
    .into_driver_in(&runtime);

    let mut random = AsyncApp::new((), |_: &mut ()| {
        async_view(
            || delayed(2, Greeting::random()),
            |greeting| match greeting {
                Greeting::Hello => success_view("Hello world"),
                Greeting::Goodbye => success_view("Goodbye world"),
            },
        )
        .initial(|| {
            if rand::random() {
                loading_view()
            } else {
                label("...")
            }
        })
    })
    .into_driver_in(&runtime);

    let show = |name: &str, root: &Node| match root.text() {
        Some(text) => println!("{name:>22}: {text}"),
        None => println!("{name:>22}: (nothing)"),
    };

    println!("Before the tasks complete:");
    show("plain", plain.root());
    show("with loading", with_loading.root());
    show("failing", failing.root());
    show("failing with loading", failing_with_loading.root());
    show("random", random.root());

    runtime.block_on(async {
        tokio::join!(
            plain.dispatch_until(settled),
            with_loading.dispatch_until(settled),
            failing.dispatch_until(settled),
            failing_with_loading.dispatch_until(settled),
            random.dispatch_until(settled),
        )
    });

    println!("After the tasks complete:");
    show("plain", plain.root());
    show("with loading", with_loading.root());
    show("failing", failing.root());
    show("failing with loading", failing_with_loading.root());
    show("random", random.root());

    plain.unmount();
    with_loading.unmount();
    failing.unmount();
    failing_with_loading.unmount();
    random.unmount();
    Ok(())
}
