use crate::{model::auth::AuthResponseDto, server::service::auth::token::TokenPair};

/// A signed-in user together with a freshly issued token pair.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub tokens: TokenPair,
}

impl AuthSession {
    pub fn into_dto(self) -> AuthResponseDto {
        AuthResponseDto {
            id: self.user_id,
            name: self.name,
            email: self.email,
            access_token: self.tokens.access_token,
            refresh_token: self.tokens.refresh_token,
        }
    }
}
