//! # TrustWipe Test Suite
//!
//! Cross-subsystem scenarios. Per-crate behavior is tested inside each crate.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs   # Engine wired to a scripted executor in a tempdir
//!     ├── e2e_wipe.rs   # Full lifecycle against a real child process
//!     └── flows.rs      # Rate limiting, busy devices, bus, redaction
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p tw-tests
//! cargo test -p tw-tests integration::e2e_wipe
//! ```

pub mod integration;
