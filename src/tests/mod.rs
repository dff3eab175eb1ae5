//! Tests for the ESP workflow.
