pub mod error;
pub mod result;
pub mod schema;
pub mod text;
pub mod visitor;

pub use error::*;
pub use result::*;
pub use schema::*;
pub use text::*;
pub use visitor::*;
