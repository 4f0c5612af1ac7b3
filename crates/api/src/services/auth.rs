//! Authentication endpoints

use crate::{ApiClient, ApiResponse, ErrorKey};
use reqwest::Method;
use shared::{LoginRequest, RegisterRequest, ResetPasswordRequest};

impl ApiClient {
    /// `POST /api/auth/register`
    pub async fn register(&self, request: &RegisterRequest) -> ApiResponse {
        let builder = self.request(Method::POST, "/api/auth/register").json(request);
        self.send(builder, ErrorKey::Message).await
    }

    /// `POST /api/auth/login`; a 2xx body carries `{message, user, token}`
    pub async fn login(&self, request: &LoginRequest) -> ApiResponse {
        let builder = self.request(Method::POST, "/api/auth/login").json(request);
        self.send(builder, ErrorKey::Message).await
    }

    /// `POST /api/auth/logout`
    pub async fn logout(&self) -> ApiResponse {
        let builder = self.request(Method::POST, "/api/auth/logout");
        self.send(builder, ErrorKey::Message).await
    }

    /// `POST /api/auth/reset-password`
    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> ApiResponse {
        let builder = self.request(Method::POST, "/api/auth/reset-password").json(request);
        self.send(builder, ErrorKey::Message).await
    }
}
