pub mod claims;
pub mod errors;
pub mod secrets;
pub mod subject;
pub mod token;

pub use claims::Claims;
pub use errors::ConfigInvalid;
pub use errors::TokenError;
pub use secrets::SecretSet;
pub use subject::AuthInfo;
pub use subject::Subject;
pub use token::TokenService;
