mod login;
pub use login::Login;

mod dogs;
pub use dogs::Dogs;
