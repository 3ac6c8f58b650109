mod envelope;
mod session;
mod signer;

pub use envelope::PendingProfile;
pub use session::{Role, User};
pub use signer::Signer;
