mod badge;

pub use badge::{Badge, EarnedBadge};
