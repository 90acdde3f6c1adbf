pub mod assistant;
pub mod auth;
pub mod club;
pub mod member;
pub mod store;
pub mod tournament;
pub mod transaction;

pub use assistant::assistant_config;
pub use auth::auth_config;
pub use club::club_config;
pub use member::member_config;
pub use store::store_config;
pub use tournament::tournament_config;
pub use transaction::transaction_config;
