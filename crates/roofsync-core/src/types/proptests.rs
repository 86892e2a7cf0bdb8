//! Property-based tests for the capacity rules and collection invariants.
