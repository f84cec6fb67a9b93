pub mod chat;
pub mod lookup;

pub use chat::{ChatState, Role, Turn};
pub use lookup::{LookupForm, LookupResult};
