//! Kudo feed use cases

mod list_kudos;
mod send_kudo;

pub use list_kudos::{KudoFeed, ListKudosUseCase};
pub use send_kudo::{SendKudoCommand, SendKudoUseCase};
