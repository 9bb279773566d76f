//! Integration tests for `portr`, run against loopback listeners.

#[cfg(test)]
mod scan;
#[cfg(test)]
mod utils;
