mod chat;
mod credentials;
mod error;
mod member;
mod message;
mod record;
mod request;
mod response;
mod route;
mod session;
mod study;

pub use chat::*;
pub use credentials::*;
pub use error::*;
pub use member::*;
pub use message::*;
pub use record::*;
pub use request::*;
pub use response::*;
pub use route::*;
pub use session::*;
pub use study::*;
