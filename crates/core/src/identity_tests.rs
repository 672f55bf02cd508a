// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn fragment(hostname: Option<&str>) -> IdentityFragment {
    IdentityFragment {
        job_id: JobId(12),
        rank: Rank(3),
        hostname: hostname.map(str::to_string),
    }
}

#[test]
fn publish_copies_fragment_and_marks_all_local() {
    let identity = LocalIdentity::publish(fragment(Some("node01")));

    assert_eq!(identity.job_id, JobId(12));
    assert_eq!(identity.rank, Rank(3));
    assert_eq!(identity.hostname, "node01");
    assert_eq!(identity.flags, ProcFlags::ALL_LOCAL);
    assert_eq!(identity.arch, ArchTag::local());
    assert!(identity.server_uri.is_none());
}

#[test]
fn publish_falls_back_to_local_hostname() {
    let identity = LocalIdentity::publish(fragment(None));
    assert_eq!(identity.hostname, local_hostname());
    assert!(!identity.hostname.is_empty());
}

#[test]
fn name_formats_job_and_rank() {
    let identity = LocalIdentity::publish(fragment(Some("h")));
    assert_eq!(identity.name(), "[12,3]");
}

#[test]
fn all_local_contains_every_locality() {
    let flags = ProcFlags::ALL_LOCAL;
    assert!(flags.contains(ProcFlags::ON_NODE));
    assert!(flags.contains(ProcFlags::ON_SOCKET | ProcFlags::ON_CLUSTER));
    assert!(!ProcFlags::NON_LOCAL.contains(ProcFlags::ON_NODE));
}

#[test]
fn local_arch_matches_target() {
    let arch = ArchTag::local();
    assert_eq!(arch.is_little_endian(), cfg!(target_endian = "little"));
    assert_ne!(arch.bits(), 0);
}

#[test]
fn identity_serializes_flat_values() {
    let mut identity = LocalIdentity::publish(fragment(Some("node01")));
    identity.server_uri = Some("uri://host:1234".to_string());

    let json = serde_json::to_value(&identity).unwrap();
    assert_eq!(json["job_id"], 12);
    assert_eq!(json["rank"], 3);
    assert_eq!(json["server_uri"], "uri://host:1234");
}
