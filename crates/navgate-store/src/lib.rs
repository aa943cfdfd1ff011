pub mod error;
pub mod source;
pub mod store;
pub mod types;

pub use error::StoreError;
pub use source::StoreSource;
pub use store::{AccessStore, SqliteAccessStore};
pub use types::*;
