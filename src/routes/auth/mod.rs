pub mod claims;
pub mod login;
pub mod session;
pub mod signup;

pub use login::handle_login;
pub use signup::handle_signup;
