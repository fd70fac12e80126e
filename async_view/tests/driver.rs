// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Tests for async views mounted in a [`Driver`], with tasks running on tokio.

use std::future::ready;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_view::core::{View, async_view, async_view_with_id, try_async_view};
use async_view::view::label;
use async_view::{AsyncApp, Content, Driver, Node, ViewCtx};
use tokio::runtime::Handle;
use tokio::time::sleep;

#[derive(Debug)]
struct Failure;

#[tokio::test(start_paused = true)]
async fn delayed_success() {
    let mut driver = Driver::new(
        (),
        |_: &mut ()| {
            async_view(
                || async {
                    sleep(Duration::from_secs(2)).await;
                    "Hello world"
                },
                label,
            )
            .initial(|| label("Loading"))
        },
        Handle::current(),
    );
    assert_eq!(driver.root().text(), Some("Loading"));

    driver.dispatch_next().await;
    assert_eq!(driver.root().text(), Some("Hello world"));
    assert_eq!(driver.root().replacements(), 1);
}

#[tokio::test(start_paused = true)]
async fn delayed_failure() {
    let mut driver = Driver::new(
        (),
        |_: &mut ()| {
            try_async_view(
                || async {
                    sleep(Duration::from_secs(2)).await;
                    Err::<&str, _>(Failure)
                },
                label,
                |_: Failure| label("Failure"),
            )
            .initial(|| label("Loading"))
        },
        Handle::current(),
    );
    driver.dispatch_next().await;
    assert_eq!(driver.root().text(), Some("Failure"));
}

#[tokio::test(start_paused = true)]
async fn omitted_initial_view_is_placeholder() {
    let mut driver = Driver::new(
        (),
        |_: &mut ()| async_view(|| ready("Hello world"), label),
        Handle::current(),
    );
    assert!(driver.root().is_placeholder());

    driver.dispatch_next().await;
    assert_eq!(driver.root().content(), &Content::Text("Hello world".into()));
}

/// Shows `value {seconds}` after waiting for `seconds`.
fn delayed_value(seconds: &mut u64) -> impl View<u64, (), ViewCtx, Element = Node> + use<> {
    async_view_with_id(
        *seconds,
        |seconds: &u64| {
            let seconds = *seconds;
            async move {
                sleep(Duration::from_secs(seconds)).await;
                format!("value {seconds}")
            }
        },
        label,
    )
    .initial(|| label("Loading"))
}

#[tokio::test(start_paused = true)]
async fn only_latest_identity_is_applied() {
    let mut driver = Driver::new(5_u64, delayed_value, Handle::current());
    driver.update(|seconds| *seconds = 1);
    assert_eq!(driver.root().text(), Some("Loading"));

    driver.dispatch_next().await;
    assert_eq!(driver.root().text(), Some("value 1"));

    // The first run was cancelled, so it never reports back.
    sleep(Duration::from_secs(10)).await;
    assert_eq!(driver.dispatch_pending(), 0);
    assert_eq!(driver.root().text(), Some("value 1"));
}

/// Shows `value {id}` as soon as its run is polled.
fn instant_value(id: &mut u64) -> impl View<u64, (), ViewCtx, Element = Node> + use<> {
    async_view_with_id(*id, |id: &u64| ready(format!("value {id}")), label)
        .initial(|| label("Loading"))
}

#[tokio::test(start_paused = true)]
async fn queued_outcome_of_old_identity_is_discarded() {
    let mut driver = Driver::new(1_u64, instant_value, Handle::current());
    // Let the first run finish and queue its outcome before the identity changes.
    sleep(Duration::from_millis(1)).await;
    driver.update(|id| *id = 2);
    sleep(Duration::from_millis(1)).await;

    assert_eq!(driver.dispatch_pending(), 2);
    assert_eq!(driver.root().text(), Some("value 2"));
    assert_eq!(driver.root().replacements(), 1);
}

#[tokio::test(start_paused = true)]
async fn identity_change_after_success_restarts() {
    let mut driver = Driver::new(1_u64, delayed_value, Handle::current());
    driver.dispatch_next().await;
    assert_eq!(driver.root().text(), Some("value 1"));

    driver.update(|seconds| *seconds = 2);
    assert_eq!(driver.root().text(), Some("Loading"));
    driver.dispatch_next().await;
    assert_eq!(driver.root().text(), Some("value 2"));
    assert_eq!(*driver.state(), 2);
}

#[tokio::test(start_paused = true)]
async fn constant_identity_launches_once() {
    let launches = Arc::new(AtomicUsize::new(0));
    let counter = launches.clone();
    let mut driver = Driver::new(
        7_u32,
        move |id: &mut u32| {
            let counter = counter.clone();
            async_view_with_id(
                *id,
                move |_: &u32| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    ready("done")
                },
                label,
            )
        },
        Handle::current(),
    );
    for _ in 0..3 {
        driver.update(|_| {});
    }
    driver.dispatch_next().await;
    assert_eq!(driver.root().text(), Some("done"));
    assert_eq!(launches.load(Ordering::SeqCst), 1);

    driver.update(|id| *id = 8);
    assert_eq!(launches.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn unmount_aborts_run() {
    let finished = Arc::new(AtomicBool::new(false));
    let flag = finished.clone();
    let driver = Driver::new(
        (),
        move |_: &mut ()| {
            let flag = flag.clone();
            async_view(
                move || {
                    let flag = flag.clone();
                    async move {
                        sleep(Duration::from_secs(2)).await;
                        flag.store(true, Ordering::SeqCst);
                        "done"
                    }
                },
                label,
            )
        },
        Handle::current(),
    );
    driver.unmount();

    sleep(Duration::from_secs(5)).await;
    assert!(!finished.load(Ordering::SeqCst));
}

#[test]
fn app_runs_until_settled() {
    let app = AsyncApp::new(0_u32, |_: &mut u32| {
        async_view(|| ready("Hello world"), label).initial(|| label("Loading"))
    })
    .worker_threads(1);
    let state = app
        .run_until(|_, root| root.text() == Some("Hello world"))
        .unwrap();
    assert_eq!(state, 0);
}
