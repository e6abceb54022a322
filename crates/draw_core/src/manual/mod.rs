//! Manual draw mode: teams placed by hand, with automatic completion.

mod session;

pub use session::ManualDraw;
