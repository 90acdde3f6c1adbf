pub mod assistant;
pub mod club;
pub mod member;
pub mod pagination;
pub mod store;
pub mod tournament;
pub mod transaction;
pub mod user;

pub use assistant::*;
pub use club::*;
pub use member::*;
pub use pagination::*;
pub use store::*;
pub use tournament::*;
pub use transaction::*;
pub use user::*;
