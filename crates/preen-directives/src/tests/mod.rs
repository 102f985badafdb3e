//! Tests for preen-directives.
