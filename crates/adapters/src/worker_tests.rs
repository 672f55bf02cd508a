// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tether_core::{Rendezvous, WaitOutcome};

#[test]
fn worker_runs_spawned_tasks_on_its_thread() {
    let worker = ProgressWorker::start("tool").unwrap();
    let (signal, rendezvous) = Rendezvous::new();

    worker.handle().spawn(async move {
        let name = std::thread::current().name().map(str::to_string);
        signal.signal(name);
    });

    let outcome = rendezvous.wait(worker.handle(), Some(Duration::from_secs(5)));
    assert_eq!(outcome, WaitOutcome::Signaled(Some("tool".to_string())));
    assert!(worker.stop());
}

#[test]
fn timers_fire_while_caller_blocks() {
    let worker = ProgressWorker::start("timers").unwrap();
    let (signal, rendezvous) = Rendezvous::new();

    worker.handle().spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        signal.signal(());
    });

    assert_eq!(
        rendezvous.wait(worker.handle(), Some(Duration::from_secs(5))),
        WaitOutcome::Signaled(())
    );
}

#[test]
fn stop_joins_thread() {
    let worker = ProgressWorker::start("joined").unwrap();
    assert!(worker.is_running());
    assert_eq!(worker.name(), "joined");

    assert!(worker.stop());
}

#[test]
fn stop_drops_queued_tasks() {
    let worker = ProgressWorker::start("drops").unwrap();
    let ran = Arc::new(AtomicBool::new(false));
    let (signal, rendezvous) = Rendezvous::<()>::new();

    let ran_clone = Arc::clone(&ran);
    worker.handle().spawn(async move {
        tokio::time::sleep(Duration::from_secs(60)).await;
        ran_clone.store(true, Ordering::SeqCst);
        signal.signal(());
    });
    worker.stop();

    // The task never completed, so its signal half was dropped with it
    let runtime = tokio::runtime::Runtime::new().unwrap();
    assert_eq!(
        rendezvous.wait(runtime.handle(), Some(Duration::from_secs(5))),
        WaitOutcome::Abandoned
    );
    assert!(!ran.load(Ordering::SeqCst));
}

#[test]
fn dropping_worker_stops_it() {
    let worker = ProgressWorker::start("dropped").unwrap();
    drop(worker);
}

#[test]
fn worker_error_maps_to_out_of_resource() {
    let err = WorkerError::Spawn {
        name: "tool".to_string(),
        source: std::io::Error::other("no threads"),
    };
    assert_eq!(err.code(), ErrorCode::OutOfResource);
    assert!(err.to_string().contains("tool"));
}
