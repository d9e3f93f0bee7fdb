//! User controller: signup, login/refresh/logout, profile, "my clients"

use crate::core::{BillingError, PasswordHasher, TokenKind};
use crate::server::extract::{ApiPath, AuthUser, JsonBody};
use crate::server::response::ApiResponse;
use crate::server::state::AppState;
use crate::storage::Repositories;
use crate::usecases::{
    CreateUser, GetMyClients, GetSingleClient, GetUserProfile, LoginInput, LoginUser,
    SignupInput, UpdateUser, UpdateUserInput,
};
use axum::extract::State;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

/// Name of the cookie carrying the refresh token
pub const REFRESH_COOKIE: &str = "refreshToken";

pub struct UserController {
    signup_user: CreateUser,
    login_user: LoginUser,
    get_user_profile: GetUserProfile,
    update_user: UpdateUser,
    get_my_clients: GetMyClients,
    get_single_client: GetSingleClient,
}

impl UserController {
    pub fn new(repositories: &Repositories, hasher: PasswordHasher) -> Self {
        Self {
            signup_user: CreateUser::new(repositories.users.clone(), hasher),
            login_user: LoginUser::new(repositories.users.clone(), hasher),
            get_user_profile: GetUserProfile::new(repositories.users.clone()),
            update_user: UpdateUser::new(repositories.users.clone()),
            get_my_clients: GetMyClients::new(repositories.clients.clone()),
            get_single_client: GetSingleClient::new(repositories.clients.clone()),
        }
    }
}

/// HTTP-only, cross-site refresh cookie scoped to `/`
pub fn refresh_cookie(token: String, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, token))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .path("/")
        .max_age(time::Duration::seconds(max_age_secs))
        .build()
}

/// Same attributes as [`refresh_cookie`], empty and already expired
fn expired_refresh_cookie() -> Cookie<'static> {
    let mut cookie = refresh_cookie(String::new(), 0);
    cookie.make_removal();
    cookie
}

/// POST /api/users/signup
pub async fn signup_user(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<SignupInput>,
) -> Result<ApiResponse, BillingError> {
    let user = state.users.signup_user.execute(input).await?;

    ApiResponse::created("new user created").with("user", &user)
}

/// POST /api/users/login
pub async fn login_user(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(input): JsonBody<LoginInput>,
) -> Result<(CookieJar, ApiResponse), BillingError> {
    let user = state.users.login_user.execute(input).await?;
    let tokens = state.tokens.generate_pair(&user.id)?;

    let response = ApiResponse::ok("Logged in successfully")
        .with("user", &user)?
        .with("accessToken", &tokens.access_token)?;
    let jar = jar.add(refresh_cookie(
        tokens.refresh_token,
        tokens.refresh_expires_in,
    ));

    Ok((jar, response))
}

/// POST /api/users/refresh
pub async fn refresh_access_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<ApiResponse, BillingError> {
    let token = jar
        .get(REFRESH_COOKIE)
        .map(Cookie::value)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| BillingError::unauthorized("Missing refresh token"))?;

    let claims = state.tokens.verify(token, TokenKind::Refresh)?;
    let user_id = claims.user_id()?;
    let access_token = state.tokens.generate_access(&user_id)?;

    tracing::debug!(user_id = %user_id, "access token refreshed");
    ApiResponse::ok("Token refreshed").with("accessToken", &access_token)
}

/// POST /api/users/logout
pub async fn logout_user(jar: CookieJar) -> (CookieJar, ApiResponse) {
    (jar.add(expired_refresh_cookie()), ApiResponse::ok("Logged out"))
}

/// GET /api/users/profile
pub async fn get_user_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<ApiResponse, BillingError> {
    let user = state.users.get_user_profile.execute(auth.user_id).await?;

    ApiResponse::ok("User loaded successfully").with("user", &user)
}

/// PUT /api/users/profile
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(input): JsonBody<UpdateUserInput>,
) -> Result<ApiResponse, BillingError> {
    let user = state
        .users
        .update_user
        .execute(input, auth.user_id)
        .await?;

    ApiResponse::created("User updated").with("user", &user)
}

/// GET /api/users/clients
pub async fn get_my_clients(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<ApiResponse, BillingError> {
    let clients = state.users.get_my_clients.execute(auth.user_id).await?;

    ApiResponse::ok("Clients loaded").with("clients", &clients)
}

/// GET /api/users/clients/{client_id}
pub async fn get_single_client(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(client_id): ApiPath<Uuid>,
) -> Result<ApiResponse, BillingError> {
    let client = state
        .users
        .get_single_client
        .execute(client_id, auth.user_id)
        .await?;

    ApiResponse::ok("Client loaded").with("client", &client)
}
