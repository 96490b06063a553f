//! Remote deck persistence: schema, normalization, transport ports and
//! the whole-document deck store.

pub mod decode;
pub mod http;
pub mod identity;
pub mod schema;
pub mod store;
pub mod transport;

pub use decode::*;
pub use http::*;
pub use identity::*;
pub use schema::*;
pub use store::*;
pub use transport::*;
