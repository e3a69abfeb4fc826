// Authentication module
// Request signing and the 401 refresh/retry state machine

mod authenticator;
mod refresh;
mod session;
mod signer;
mod types;

pub use authenticator::TokenAuthenticator;
pub use refresh::{HttpRefreshClient, RefreshClient};
pub use session::{LogoutHandler, SessionFailureHandler};
pub use signer::RequestSigner;
pub use types::{Token, TokenPair};
