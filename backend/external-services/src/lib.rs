pub mod fixtures;
pub mod service;

pub use fixtures::FixtureResponseSource;
pub use service::HttpResponseSource;
