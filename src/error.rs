//! Error types returned by the fallible operations of this crate.

use thiserror::Error;

/// The failure conditions documented for this crate's mutating and typed-access operations.
///
/// Non-throwing counterparts (`try_*`, `contains`, `find`) report the same conditions as
/// `Option`/`bool` instead of constructing this enum.
#[derive(Error, Debug, Clone, Copy, Eq, PartialEq)]
pub enum EcsError {
	/// A required argument (archetype, component type, destination table) was absent.
	///
	/// This crate's public API takes those arguments by value or `&T` rather than by option or
	/// nullable pointer, so nothing in this tree currently constructs this variant; it stays
	/// available for callers building on the lower-level `EntityTable`/`AnyBuffer` primitives
	/// directly, where such an argument could plausibly be missing.
	#[error("a required argument was null")]
	NullArgument,

	/// An index or range fell outside `[0, count]` for the table it was applied to.
	#[error("index or range out of bounds")]
	OutOfRange,

	/// A row could not be pushed because the table had already reached its capacity.
	#[error("table is at capacity")]
	TableFull,

	/// A mutation was attempted through a table handle not owned by the acting registry.
	///
	/// `move_to` is the only entry point that checks ownership, and it currently reports a
	/// foreign handle as [`UnmodifiableTable`](Self::UnmodifiableTable) instead; this variant is
	/// kept distinct for callers who want to tell "not yours" apart from "not writable right
	/// now" once an entry point makes that distinction.
	#[error("table does not belong to this registry")]
	TableReadOnly,

	/// A mutation was attempted through a stale or otherwise unmodifiable table handle.
	#[error("table cannot be modified in its current state")]
	UnmodifiableTable,

	/// The supplied entity does not resolve to a live record.
	#[error("entity not found")]
	EntityNotFound,

	/// The requested component type has no storage column in the addressed table.
	#[error("component type missing from table")]
	ComponentTypeMissing,
}

/// Convenience alias for results returned by this crate's fallible operations.
pub type EcsResult<T> = Result<T, EcsError>;
