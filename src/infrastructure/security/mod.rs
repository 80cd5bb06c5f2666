mod argon2_hasher;
mod session_codec;

pub use argon2_hasher::Argon2PasswordHasher;
pub use session_codec::{SessionCodec, SessionCodecError};
