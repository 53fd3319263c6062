pub mod asserts;
pub mod random;
