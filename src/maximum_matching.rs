mod blossom;
mod context;
mod csr;
pub mod edmonds_blossom;
mod endpoint;
pub mod error;
pub mod graph;
pub mod greedy;
pub mod labeled;
pub mod status;
#[cfg(any(test, feature = "verify-optimum", feature = "check-delta"))]
#[cfg_attr(not(test), allow(dead_code))]
mod verification;
