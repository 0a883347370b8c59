pub mod user;

pub use user::AccountRow;
