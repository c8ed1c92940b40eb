use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod handlers;
pub mod models;
pub mod views;

use api::ApiClient;
use auth::guard::LoginPolicy;
use auth::session::{SessionState, SessionStore};
use config::Config;
use dashboard::Screen;
use models::{
    health::{HealthGoal, HealthMetric},
    meal::DailyMeal,
    mood::MoodEntry,
    reminder::Reminder,
    sleep::SleepRecord,
};

/// Local state of each dashboard screen.
#[derive(Default)]
pub struct Screens {
    pub meals: Mutex<Screen<DailyMeal>>,
    pub health: Mutex<Screen<HealthMetric>>,
    pub goals: Mutex<Screen<HealthGoal>>,
    pub sleep: Mutex<Screen<SleepRecord>>,
    pub reminders: Mutex<Screen<Reminder>>,
    pub moods: Mutex<Screen<MoodEntry>>,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub api: ApiClient,
    pub session: SessionStore,
    pub policy: LoginPolicy,
    pub screens: Arc<Screens>,
}

impl AppState {
    pub fn new(config: Config, api: ApiClient, session: SessionStore) -> Self {
        let policy = config.login_policy();
        Self {
            config: Arc::new(config),
            api,
            session,
            policy,
            screens: Arc::new(Screens::default()),
        }
    }

    /// Session contents after logout: no identity, full attempt budget.
    pub fn fresh_session(&self) -> SessionState {
        SessionState {
            identity: None,
            guard: self.policy.fresh_state(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/status", get(handlers::status::status))
        .route("/", get(handlers::auth::login_screen))
        .route("/login", get(handlers::auth::login_screen))
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/session", get(handlers::auth::session));

    let private_routes = Router::new()
        // Health metrics and goals
        .route("/health", get(handlers::health::dashboard))
        .route("/health/goals", put(handlers::health::update_goal))
        .route("/health/metrics/:date", put(handlers::health::update_metric))
        .route("/health/edit/:date", post(handlers::health::begin_edit))
        .route("/health/edit", delete(handlers::health::cancel_edit))
        // Meals
        .route("/dailymeals", get(handlers::meals::dashboard))
        // Sleep
        .route("/sleep", get(handlers::sleep::dashboard))
        .route("/sleep", post(handlers::sleep::create))
        .route("/sleep/:key", put(handlers::sleep::update))
        .route("/sleep/:key", delete(handlers::sleep::remove))
        .route("/sleep/edit/:date", post(handlers::sleep::begin_edit))
        .route("/sleep/edit", delete(handlers::sleep::cancel_edit))
        // Reminders
        .route("/reminder", get(handlers::reminders::dashboard))
        .route("/reminder", post(handlers::reminders::create))
        .route("/reminder/:id/status", put(handlers::reminders::set_status))
        // Moods
        .route("/mood", get(handlers::moods::dashboard))
        .route("/mood", post(handlers::moods::create))
        .route("/mood/:id", put(handlers::moods::update))
        .route("/mood/:id", delete(handlers::moods::remove))
        .route("/mood/edit/:id", post(handlers::moods::begin_edit))
        .route("/mood/edit", delete(handlers::moods::cancel_edit))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    let cors = match state.config.frontend_url.parse::<axum::http::HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
            ])
            .allow_credentials(true),
        Err(_) => {
            tracing::warn!(origin = %state.config.frontend_url, "Invalid FRONTEND_URL, CORS disabled");
            CorsLayer::new()
        }
    };

    Router::new()
        .merge(public_routes)
        .merge(private_routes)
        .fallback(handlers::status::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
