use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Account registration request, forwarded verbatim to the authentication
/// collaborator.
///
/// All four fields must be non-empty; nothing else is validated here. In
/// particular `password` and `confirm_password` are NOT compared for
/// equality: both are forwarded as-is, and any matching policy belongs to
/// the provider.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegistrationRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[validate(length(min = 1))]
    pub confirm_password: String,
}

impl RegistrationRequest {
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
