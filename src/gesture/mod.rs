pub mod response;
pub mod state;
