pub mod ido;
pub mod token;

pub use ido::INaijaLoyalIDO;
pub use token::INaijaLoyal;
