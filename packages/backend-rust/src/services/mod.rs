pub mod compiler;
pub mod mastery;
pub mod session;
