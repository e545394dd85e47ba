pub mod http_utils;
pub mod log_utils;
pub mod url_utils;

pub use http_utils::HttpClient;
pub use log_utils::recover;
pub use url_utils::{is_https, root_resource, validate_url};
