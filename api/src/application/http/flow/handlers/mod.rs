pub mod suggest_hairstyle;
pub mod suggest_outfit_from_photo;
