//! Domain types for provcheck.
//!
//! Pure data and comparison rules with no I/O: the expected baseline the
//! server is audited against, and the results individual checks produce.

/// The expected provisioning baseline.
///
/// See [`baseline::ExpectedBaseline`] for the main type.
pub mod baseline;

/// Check results and the comparison rules that produce them.
pub mod check;
