mod cookie;
mod http;
mod intervu_infra;
mod json_file;
mod local_storage;
mod navigator;

pub use cookie::FileCookieStore;
pub use intervu_infra::*;
pub use local_storage::FileKeyValueStore;
pub use navigator::RouteNavigator;

pub use self::http::IntervuHttpService;
