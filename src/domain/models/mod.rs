mod view_state;

pub use view_state::*;
