pub mod admin;
pub mod auth;
pub mod badges;
pub mod contact;
pub mod education;
pub mod leaderboard;
pub mod profiles;
pub mod reports;
