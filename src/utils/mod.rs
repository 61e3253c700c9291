pub mod bigint;
pub mod crypto;
pub mod errors;
