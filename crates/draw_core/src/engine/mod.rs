//! # Assignment engine
//!
//! - `queue`: draw order (hosts first, pots shuffled)
//! - `search`: bounded backtracking placement
//! - `lookahead`: feasibility pruning used by the search
//! - `draw`: entry points (full draw, instant draw, completion)
//! - `reveal`: staged replay of a computed draw

pub mod draw;
mod lookahead;
pub mod queue;
pub mod reveal;
pub mod search;


pub use draw::{DrawEngine, DrawResult};
pub use queue::draw_queue;
pub use reveal::{Reveal, RevealStep};
pub use search::{place, Placement};
