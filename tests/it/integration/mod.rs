//! Integration tests for chartmark.
//!
//! These tests drive the editor through complete gestures and check what
//! the host receives.

mod pointer_routing_tests;
