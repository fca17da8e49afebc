pub mod login;
pub mod profile;
pub mod signup;
pub mod types;

pub use login::login;
pub use profile::{delete_account, get_me, logout, update_me};
pub use signup::signup;
