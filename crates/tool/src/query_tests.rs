// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tether_adapters::{FakeProvider, FakeQuery, ProgressWorker};
use yare::parameterized;

const DEADLINE: Option<Duration> = Some(Duration::from_secs(5));

fn installed(provider: &FakeProvider) -> ProgressWorker {
    let worker = ProgressWorker::start("query-test").unwrap();
    provider.install_worker(worker.handle().clone());
    worker
}

#[test]
fn matching_key_yields_uri_and_releases_once() {
    let provider = FakeProvider::new("fake").answering(SERVER_URI_KEY, "uri://server:4000");
    let worker = installed(&provider);
    let pending = PendingWaits::new();

    let outcome = query_server_uri(&provider, worker.handle(), &pending, DEADLINE);

    assert_eq!(outcome, QueryOutcome::Uri("uri://server:4000".to_string()));
    assert_eq!(outcome.uri(), Some("uri://server:4000"));
    assert_eq!(provider.releases(), 1);
    assert_eq!(pending.outstanding(), 0);
}

#[parameterized(
    wrong_key = { vec![InfoEntry::new("hostname", "h")], QueryOutcome::Mismatch(ErrorCode::BadParam) },
    no_entries = { vec![], QueryOutcome::Mismatch(ErrorCode::NotSupported) },
)]
fn unexpected_reply_is_a_mismatch(entries: Vec<InfoEntry>, expected: QueryOutcome) {
    let provider = FakeProvider::new("fake").with_query(FakeQuery::Reply {
        status: Ok(()),
        entries,
    });
    let worker = installed(&provider);

    let outcome = query_server_uri(&provider, worker.handle(), &PendingWaits::new(), DEADLINE);

    assert_eq!(outcome, expected);
    assert_eq!(outcome.uri(), None);
    assert_eq!(provider.releases(), 1);
}

#[test]
fn failed_status_is_reported_and_still_released() {
    let provider = FakeProvider::new("fake").with_query(FakeQuery::Reply {
        status: Err(ErrorCode::NotFound),
        entries: vec![InfoEntry::new(SERVER_URI_KEY, "ignored")],
    });
    let worker = installed(&provider);

    let outcome = query_server_uri(&provider, worker.handle(), &PendingWaits::new(), DEADLINE);

    assert_eq!(outcome, QueryOutcome::Failed(ErrorCode::NotFound));
    assert_eq!(provider.releases(), 1);
}

#[test]
fn held_callback_times_out_and_stays_pending() {
    let provider = FakeProvider::new("fake").with_query(FakeQuery::Hold);
    let worker = installed(&provider);
    let pending = PendingWaits::new();

    let outcome = query_server_uri(
        &provider,
        worker.handle(),
        &pending,
        Some(Duration::from_millis(20)),
    );

    assert_eq!(outcome, QueryOutcome::TimedOut);
    assert_eq!(pending.outstanding(), 1);

    provider.drop_held();
    assert_eq!(pending.outstanding(), 0);
}

#[test]
fn dropped_callback_is_abandoned() {
    let provider = FakeProvider::new("fake").with_query(FakeQuery::Drop);
    let worker = installed(&provider);
    let pending = PendingWaits::new();

    let outcome = query_server_uri(&provider, worker.handle(), &pending, None);

    assert_eq!(outcome, QueryOutcome::Abandoned);
    assert_eq!(pending.outstanding(), 0);
}
