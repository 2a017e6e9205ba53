use sqlx::PgPool;

/// Application context constructed once at startup and injected into every
/// handler via axum state. The pool is the only shared mutable resource.
pub struct AppState {
    pub pool: PgPool,
}
