pub mod http;
pub mod request;
pub mod transport;


pub use http::HttpTransport;
pub use request::{map_error_response, RequestClient};
pub use transport::*;
