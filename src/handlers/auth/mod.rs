// handlers/auth/mod.rs - Token acquisition, no authentication required

pub mod register;
pub mod token;

pub use register::register_post;
pub use token::token_post;
