//! Remote perception engine implementations

pub mod factory;
pub mod http_client;
pub mod remote;

pub use factory::RemoteEngineFactory;
pub use http_client::{HttpClient, HttpClientTrait};
pub use remote::RemoteEngine;
