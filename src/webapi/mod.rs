mod client;

pub use crate::webapi::client::WebApi;
