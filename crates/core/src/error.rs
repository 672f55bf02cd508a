// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime status codes
//!
//! Every failure that crosses a subsystem boundary is reduced to one of these
//! codes so that operator-facing diagnostics can show both the number and a
//! stable name.

use std::fmt;

/// Status code reported by providers, modules and the lifecycle sequencers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Error,
    OutOfResource,
    BadParam,
    NotImplemented,
    NotSupported,
    Unreach,
    NotFound,
    Timeout,
    NotAvailable,
    /// Failure already reported to the operator; print nothing further
    Silent,
}

impl ErrorCode {
    /// Numeric value of the code
    pub fn code(self) -> i32 {
        match self {
            ErrorCode::Error => -1,
            ErrorCode::OutOfResource => -2,
            ErrorCode::BadParam => -5,
            ErrorCode::NotImplemented => -7,
            ErrorCode::NotSupported => -8,
            ErrorCode::Unreach => -12,
            ErrorCode::NotFound => -13,
            ErrorCode::Timeout => -15,
            ErrorCode::NotAvailable => -16,
            ErrorCode::Silent => -43,
        }
    }

    /// Human-readable name of the code
    pub fn name(self) -> &'static str {
        match self {
            ErrorCode::Error => "ERROR",
            ErrorCode::OutOfResource => "OUT_OF_RESOURCE",
            ErrorCode::BadParam => "BAD_PARAM",
            ErrorCode::NotImplemented => "NOT_IMPLEMENTED",
            ErrorCode::NotSupported => "NOT_SUPPORTED",
            ErrorCode::Unreach => "UNREACH",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Timeout => "TIMEOUT",
            ErrorCode::NotAvailable => "NOT_AVAILABLE",
            ErrorCode::Silent => "SILENT",
        }
    }

    /// Look up a code by its numeric value
    pub fn from_code(code: i32) -> Option<Self> {
        ALL.iter().copied().find(|c| c.code() == code)
    }
}

const ALL: [ErrorCode; 10] = [
    ErrorCode::Error,
    ErrorCode::OutOfResource,
    ErrorCode::BadParam,
    ErrorCode::NotImplemented,
    ErrorCode::NotSupported,
    ErrorCode::Unreach,
    ErrorCode::NotFound,
    ErrorCode::Timeout,
    ErrorCode::NotAvailable,
    ErrorCode::Silent,
];

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

impl std::error::Error for ErrorCode {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
