pub mod club_members;
pub mod clubs;
pub mod redemptions;
pub mod store_items;
pub mod tournament_registrations;
pub mod tournaments;
pub mod transactions;
pub mod users;

pub use club_members as club_member_entity;
pub use clubs as club_entity;
pub use redemptions as redemption_entity;
pub use store_items as store_item_entity;
pub use tournament_registrations as tournament_registration_entity;
pub use tournaments as tournament_entity;
pub use transactions as transaction_entity;
pub use users as user_entity;

pub use club_members::{ClubRole, MemberStatus};
pub use redemptions::RedemptionStatus;
pub use tournaments::TournamentStatus;
pub use transactions::TransactionType;
