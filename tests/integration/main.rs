//! Integration tests for fmuviz

mod helpers;

mod backend_test;
mod cli_test;
mod config_test;
mod sample_test;
mod simulate_test;
