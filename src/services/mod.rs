//! One module per backend domain. Every function maps 1:1 to a REST call and takes
//! the `ApiClient` to use, already carrying the caller's cookies when needed.

pub mod branches;
pub mod contact;
pub mod fund_prices;
pub mod fund_reports;
pub mod funds;
pub mod news;
pub mod team_members;

/// Empty query string for calls that take none.
pub(crate) const NO_QUERY: &[(&str, &str)] = &[];
