// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime module test doubles

mod fake;

pub use fake::{FakeModule, ModuleCall, ModuleLog};
