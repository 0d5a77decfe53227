use crate::api::{ApiClient, ApiError, MessageResponse, ResetPasswordRequest};
use std::rc::Rc;

#[derive(Clone)]
pub struct RecuperarRepository {
    client: Rc<ApiClient>,
}

impl Default for RecuperarRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl RecuperarRepository {
    pub fn new() -> Self {
        Self {
            client: Rc::new(ApiClient::new()),
        }
    }

    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn request_code(&self, email: String) -> Result<MessageResponse, ApiError> {
        self.client.forgot_password(&email).await
    }

    pub async fn reset(&self, request: ResetPasswordRequest) -> Result<MessageResponse, ApiError> {
        self.client.reset_password(request).await
    }
}
