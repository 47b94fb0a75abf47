//! # dotsupport Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the dotsupport library.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all dotsupport operations
pub use crate::Error;

/// The result type used throughout dotsupport
pub use crate::Result;

// ================================================================================================
// Collections
// ================================================================================================

/// Thread-safe map with compute-if-absent
pub use crate::collections::{LazyMap, MergePolicy};

/// Bounded cursor queue and its item trait
pub use crate::collections::{CursorQueue, Enqueued, QueueConfig, QueueItem};

// ================================================================================================
// Diagnostics
// ================================================================================================

/// Collector for absorbed boundary conditions
pub use crate::diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics};
