//! Session credentials.
//!
//! The gallery is only reachable with a logged-in browser session; its
//! cookies arrive as a Netscape-format export and are loaded into the jar the
//! HTTP client sends with every request.

mod cookie_file;

pub use cookie_file::{
    CookieError, CookieFile, RejectedLine, SessionCookie, load_cookie_file,
};
