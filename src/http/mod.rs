pub mod base;
pub mod reqwest_client;

pub use base::{HttpResponse, HttpTransport};
pub use reqwest_client::ReqwestTransport;
