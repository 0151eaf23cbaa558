// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::caller::{Caller, CallerRole};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use once_cell::sync::Lazy;
use serde_json::json;
use uuid::Uuid;

/// 上游认证代理写入的用户ID
pub static USER_ID_HEADER: Lazy<HeaderName> = Lazy::new(|| HeaderName::from_static("x-user-id"));
/// 上游认证代理写入的用户角色
pub static USER_ROLE_HEADER: Lazy<HeaderName> =
    Lazy::new(|| HeaderName::from_static("x-user-role"));

/// 当前请求的调用者
///
/// 缺少或无法解析身份头时以 401 拒绝
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedCaller(pub Caller);

fn unauthorized(message: &str) -> Response {
    let body = Json(json!({ "error": message }));
    (StatusCode::UNAUTHORIZED, body).into_response()
}

fn header<'a>(parts: &'a Parts, name: &HeaderName) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}

impl<S> FromRequestParts<S> for AuthenticatedCaller
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header(parts, &USER_ID_HEADER)
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
            .ok_or_else(|| unauthorized("Missing or invalid X-User-Id header"))?;
        let role = header(parts, &USER_ROLE_HEADER)
            .and_then(|v| v.trim().parse::<CallerRole>().ok())
            .ok_or_else(|| unauthorized("Missing or invalid X-User-Role header"))?;

        Ok(AuthenticatedCaller(Caller::new(user_id, role)))
    }
}
