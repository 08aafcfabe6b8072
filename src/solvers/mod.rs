pub mod reconstruction;
pub mod sweep;
