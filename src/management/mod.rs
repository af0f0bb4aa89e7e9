mod session;
mod state;

pub use session::Session;
pub use session::SharedSession;
pub use state::AUTH_STATE_KEY;
pub use state::AuthStateStore;
pub use state::FileStateStore;
pub use state::MemoryStateStore;
