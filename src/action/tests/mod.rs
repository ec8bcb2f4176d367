//! Unit tests for the action lifecycle module.
