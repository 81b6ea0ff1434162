pub mod ply;
pub mod plot;
