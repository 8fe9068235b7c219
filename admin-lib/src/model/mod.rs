//! API payload types

mod firm;
mod job;
mod product;
mod session;
mod user;

pub use firm::*;
pub use job::*;
pub use product::*;
pub use session::*;
pub use user::*;
