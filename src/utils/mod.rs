//! The `utils` module provides shared utilities used across the
//! application, such as logging setup.

pub mod logging;
