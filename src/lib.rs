//! xpboard: a dashboard client for a learning-platform GraphQL API.
//!
//! Signs a student in, persists the bearer token locally, fans out the fixed
//! query catalog in parallel, reduces raw rows to display aggregates, and
//! renders them as a terminal report and standalone SVG charts.

pub mod aggregate;
pub mod auth;
pub mod chart;
pub mod config;
pub mod error;
pub mod graphql;
pub mod logging;
pub mod model;
pub mod profile;
pub mod queries;
pub mod session;
pub mod store;
pub mod svg;
