pub mod rate_outfit;
pub mod suggest_hairstyle;
pub mod suggest_outfit;
