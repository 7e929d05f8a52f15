//! Authentication handlers.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use folio_core::domain::User;
use folio_core::ports::{PasswordService, TokenService};
use folio_shared::dto::{
    AuthResponse, LoginRequest, MeResponse, PortfolioSummary, RegisterRequest, RegisterResponse,
    UserResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input
    if req.email.is_empty() || !req.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    if req.full_name.trim().is_empty() {
        return Err(AppError::BadRequest("Full name is required".to_string()));
    }

    // Check if the email is already taken
    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    // Hash password
    let password_hash = password_service
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    // Create user
    let user = User::new(req.full_name, req.email, password_hash);
    let saved = state.users.insert(user).await?;

    tracing::info!(user_id = %saved.id, "User registered");

    Ok(HttpResponse::Created().json(RegisterResponse {
        id: saved.id.to_string(),
        email: saved.email,
    }))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Unknown email and wrong password both answer 401, so callers cannot
    // probe which addresses are registered.
    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let valid = password_service
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::Unauthorized);
    }

    let token = token_service
        .issue(user.id, &user.email)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    // Bookkeeping only; the token stays valid regardless.
    state.users.record_token(user.id, &token).await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds() as u64,
    }))
}

/// GET /api/auth/me - Protected route
///
/// A valid token whose user has since disappeared still answers 401.
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let portfolios = state
        .portfolios
        .find_by_user_id(user.id)
        .await?
        .into_iter()
        .map(|p| PortfolioSummary {
            id: p.id.to_string(),
            full_name: p.full_name,
        })
        .collect();

    Ok(HttpResponse::Ok().json(MeResponse {
        user: UserResponse {
            id: user.id.to_string(),
            full_name: user.full_name,
            email: user.email,
            created_at: user.created_at.to_rfc3339(),
        },
        portfolios,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use actix_web::{App, http::StatusCode, test};
    use async_trait::async_trait;
    use uuid::Uuid;

    use folio_core::domain::Portfolio;
    use folio_core::error::RepoError;
    use folio_core::ports::{FileKind, FileStore, PortfolioRepository, StorageError, UserRepository};
    use folio_infra::{Argon2PasswordService, JwtConfig, JwtTokenService};

    use super::*;
    use crate::state::AppState;

    #[derive(Default)]
    struct InMemoryUsers(Mutex<Vec<User>>);

    #[async_trait]
    impl UserRepository for InMemoryUsers {
        async fn insert(&self, user: User) -> Result<User, RepoError> {
            let mut users = self.0.lock().unwrap();
            if users.iter().any(|u| u.email == user.email) {
                return Err(RepoError::Constraint("duplicate email".to_string()));
            }
            users.push(user.clone());
            Ok(user)
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
            Ok(self.0.lock().unwrap().iter().find(|u| u.id == id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
            Ok(self
                .0
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn record_token(&self, id: Uuid, token: &str) -> Result<(), RepoError> {
            let mut users = self.0.lock().unwrap();
            let user = users.iter_mut().find(|u| u.id == id).ok_or(RepoError::NotFound)?;
            user.last_token = Some(token.to_string());
            Ok(())
        }
    }

    struct NoPortfolios;

    #[async_trait]
    impl PortfolioRepository for NoPortfolios {
        async fn insert(&self, portfolio: Portfolio) -> Result<Portfolio, RepoError> {
            Ok(portfolio)
        }

        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Portfolio>, RepoError> {
            Ok(None)
        }

        async fn find_by_user_id(&self, _user_id: Uuid) -> Result<Vec<Portfolio>, RepoError> {
            Ok(Vec::new())
        }

        async fn update(&self, _p: Portfolio, _acting: Uuid) -> Result<Portfolio, RepoError> {
            Err(RepoError::NotFound)
        }

        async fn delete(&self, _id: Uuid, _acting: Uuid) -> Result<Portfolio, RepoError> {
            Err(RepoError::NotFound)
        }
    }

    struct NullFiles;

    #[async_trait]
    impl FileStore for NullFiles {
        async fn save(
            &self,
            kind: FileKind,
            owner_id: Uuid,
            original_name: &str,
            _bytes: &[u8],
        ) -> Result<String, StorageError> {
            Ok(format!("{}_{}_{}", kind.as_str(), owner_id, original_name))
        }

        async fn delete(&self, _path: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    fn test_state() -> AppState {
        AppState {
            users: Arc::new(InMemoryUsers::default()),
            portfolios: Arc::new(NoPortfolios),
            files: Arc::new(NullFiles),
        }
    }

    fn test_services() -> (Arc<dyn TokenService>, Arc<dyn PasswordService>) {
        let tokens = JwtTokenService::new(JwtConfig {
            secret: "test-secret".to_string(),
            ttl_minutes: 30,
            issuer: "test".to_string(),
        });
        (Arc::new(tokens), Arc::new(Argon2PasswordService::new()))
    }

    macro_rules! test_app {
        () => {{
            let (tokens, passwords) = test_services();
            test::init_service(
                App::new()
                    .app_data(web::Data::new(test_state()))
                    .app_data(web::Data::new(tokens))
                    .app_data(web::Data::new(passwords))
                    .configure(crate::handlers::configure_routes),
            )
            .await
        }};
    }

    fn register_body() -> RegisterRequest {
        RegisterRequest {
            full_name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "p@ssw0rd-123".to_string(),
        }
    }

    #[actix_web::test]
    async fn register_login_me_round_trip() {
        let app = test_app!();

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/register")
                .set_json(register_body())
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        // Wrong password is rejected
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(LoginRequest {
                    email: "alice@example.com".to_string(),
                    password: "wrong".to_string(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        // Correct password yields a bearer token
        let auth: AuthResponse = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(LoginRequest {
                    email: "alice@example.com".to_string(),
                    password: "p@ssw0rd-123".to_string(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(auth.token_type, "Bearer");

        // The token identifies the user
        let me: MeResponse = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/auth/me")
                .insert_header((
                    "Authorization",
                    format!("Bearer {}", auth.access_token),
                ))
                .to_request(),
        )
        .await;
        assert_eq!(me.user.email, "alice@example.com");
        assert!(me.portfolios.is_empty());
    }

    #[actix_web::test]
    async fn duplicate_email_conflicts() {
        let app = test_app!();

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/register")
                .set_json(register_body())
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/register")
                .set_json(register_body())
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn unknown_email_logs_in_as_unauthorized_not_missing() {
        let app = test_app!();

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(LoginRequest {
                    email: "nobody@example.com".to_string(),
                    password: "whatever-123".to_string(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn short_password_is_rejected() {
        let app = test_app!();

        let mut body = register_body();
        body.password = "short".to_string();

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/register")
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn me_without_token_is_unauthorized() {
        let app = test_app!();

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/auth/me").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
