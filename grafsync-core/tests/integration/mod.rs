mod common;
mod reconcile_tests;
