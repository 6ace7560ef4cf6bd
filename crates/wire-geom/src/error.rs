// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use thiserror::Error;

/// Errors raised by geometric primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeomError {
    /// A divisor (scalar, component, or magnitude) was exactly zero.
    #[error("division by zero")]
    DivideByZero,
    /// A runtime operand did not have the expected number of components.
    #[error("dimension mismatch: expected {expected} components, found {found}")]
    TypeMismatch {
        /// Dimensionality required by the receiving type.
        expected: usize,
        /// Dimensionality of the offered operand.
        found: usize,
    },
}
