//! Unit tests for individual public components.

mod unit;
