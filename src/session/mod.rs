//! Persistence of the logged-in identity.
//!
//! Only the email is stored; points and position always come from the
//! backend. The stored email is a convenience, not a credential, and must be
//! re-validated before it is trusted.

mod store;

pub use store::{
    FileSessionStore, MemorySessionStore, SessionError, SessionRecord, SessionStore, SESSION_KEY,
};
