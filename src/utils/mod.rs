pub mod crypto;
pub mod media;
pub mod token;
