//! Unit tests for `preen_syntax`.

mod unit;
