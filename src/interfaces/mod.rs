//! Interface adapters
//!
//! - `http`: REST API with Swagger documentation
//! - `ws`: live event stream for dashboards

pub mod http;
pub mod ws;
