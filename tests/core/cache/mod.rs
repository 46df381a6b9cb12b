//! Content cache tests
