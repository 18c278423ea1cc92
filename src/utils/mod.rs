pub mod embed;
pub mod idle;
pub mod voice;
