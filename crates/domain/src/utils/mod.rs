//! Domain utility functions.

pub mod test_case_parser;
