//! Cross-module suites: round-trips, chunked streaming, and oracle
//! comparisons against `std`/`bstr`.
