pub mod entities;
pub mod errors;
pub mod ports;

pub use entities::{Kudo, KudoStyle, KudoWithAuthor};
pub use errors::KudoError;
