pub mod lifecycle;
pub mod orders;
pub mod planning;
