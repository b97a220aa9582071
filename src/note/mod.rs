//! Monthly note text model: where the note lives, what today's heading looks
//! like, and where today's section ends.

pub mod heading;
pub mod path;
pub mod section;
