pub mod check;
pub mod highlight;
