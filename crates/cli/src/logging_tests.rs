// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    quiet = { 0, "warn" },
    verbose = { 1, "info" },
    very_verbose = { 2, "debug" },
    saturates = { 9, "trace" },
)]
fn verbosity_raises_default_filter(verbose: u8, expected: &str) {
    assert_eq!(default_filter(verbose), expected);
}
