pub mod interaction;
pub mod session;

pub use interaction::{FlipDirection, InteractionState, Phase};
pub use session::{Session, SessionHandle};
