pub mod assistant_service;
pub mod auth_service;
pub mod club_service;
pub mod member_service;
pub mod permission_service;
pub mod store_service;
pub mod tournament_service;
pub mod transaction_service;

pub use assistant_service::*;
pub use auth_service::*;
pub use club_service::*;
pub use member_service::*;
pub use permission_service::*;
pub use store_service::*;
pub use tournament_service::*;
pub use transaction_service::*;
