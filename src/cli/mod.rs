pub mod check;
pub mod handle;
pub mod template;
