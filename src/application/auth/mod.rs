//! Authentication and registration use cases

mod login_user;
mod logout_user;
mod register_user;
mod validate_session;

pub use login_user::{LoginUserCommand, LoginUserUseCase};
pub use logout_user::LogoutUserUseCase;
pub use register_user::{RegisterUserCommand, RegisterUserResponse, RegisterUserUseCase};
pub use validate_session::ValidateSessionUseCase;
