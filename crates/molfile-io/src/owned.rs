//! Ownership helpers shared by the parsed documents

/// Drop whatever `slot` holds and leave it empty.
///
/// Returns `true` if something was released. Releasing an empty slot is a
/// no-op, so document `release` methods can be called any number of times.
pub fn release<T>(slot: &mut Option<T>) -> bool {
    slot.take().is_some()
}
