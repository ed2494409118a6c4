mod badge_dto;

pub use badge_dto::*;
