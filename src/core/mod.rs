pub mod state;
pub mod transform;
