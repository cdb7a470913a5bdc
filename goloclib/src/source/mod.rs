//! Source discovery: decide which files to analyze.
//!
//! ## Example
//!
//! ```rust,ignore
//! use goloclib::source::FilterConfig;
//!
//! let filter = FilterConfig::new()
//!     .include_tests(true)
//!     .exclude("**/generated/**")?;
//! ```

pub mod filter;

pub use filter::FilterConfig;
