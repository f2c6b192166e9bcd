//! Integration tests for the plugin bootstrap.

mod bootstrap_test;
mod helpers;
