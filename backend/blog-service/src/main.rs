use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use anyhow::Context;
use blog_service::db::{run_migrations, CommentStore, PgStore, PostStore};
use blog_service::services::{CommentService, PostService};
use blog_service::{handlers, Config};
use chrono::Utc;
use db_pool::{acquire_with_metrics, create_pool, pool_stats, DbConfig, PoolStats};
use serde::Serialize;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SERVICE_NAME: &str = "blog-service";

struct HealthState {
    db_pool: PgPool,
}

#[derive(Serialize, Clone)]
#[serde(rename_all = "lowercase")]
enum ComponentStatus {
    Healthy,
    Unhealthy,
}

#[derive(Serialize)]
struct ComponentCheck {
    status: ComponentStatus,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pool: Option<PoolStats>,
}

#[derive(Serialize)]
struct ReadinessResponse {
    ready: bool,
    status: ComponentStatus,
    checks: HashMap<String, ComponentCheck>,
    timestamp: String,
}

impl HealthState {
    fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    async fn check_postgres(&self) -> Result<(), sqlx::Error> {
        let mut conn = acquire_with_metrics(&self.db_pool, SERVICE_NAME).await?;
        sqlx::query("SELECT 1")
            .fetch_one(&mut *conn)
            .await
            .map(|_| ())
    }
}

async fn health_summary(state: web::Data<HealthState>) -> HttpResponse {
    match state.check_postgres().await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": SERVICE_NAME
        })),
    }
}

async fn readiness_summary(state: web::Data<HealthState>) -> HttpResponse {
    let mut checks = HashMap::new();

    let start = Instant::now();
    let pg_result = state.check_postgres().await;
    let pg_latency = Some(start.elapsed().as_millis() as u64);
    let ready = pg_result.is_ok();
    let postgres_check = match pg_result {
        Ok(_) => ComponentCheck {
            status: ComponentStatus::Healthy,
            message: "PostgreSQL connection successful".to_string(),
            latency_ms: pg_latency,
            pool: Some(pool_stats(&state.db_pool)),
        },
        Err(e) => ComponentCheck {
            status: ComponentStatus::Unhealthy,
            message: format!("PostgreSQL connection failed: {}", e),
            latency_ms: pg_latency,
            pool: Some(pool_stats(&state.db_pool)),
        },
    };
    checks.insert("postgresql".to_string(), postgres_check);

    let status = if ready {
        ComponentStatus::Healthy
    } else {
        ComponentStatus::Unhealthy
    };

    let response = ReadinessResponse {
        ready,
        status,
        checks,
        timestamp: Utc::now().to_rfc3339(),
    };

    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into());
    let registry = tracing_subscriber::registry().with(filter);

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Container health check: exit 0 when the database answers
async fn run_healthcheck(config: &Config) -> anyhow::Result<()> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&config.database.url)
        .await
        .context("healthcheck: database unreachable")?;
    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .context("healthcheck: verification query failed")?;
    Ok(())
}

/// Blog Service
///
/// Posts and comments with soft-delete semantics.
///
/// # Routes
///
/// - `/api/v1/posts/*` - Create, list, read, update, soft-delete posts
/// - `/api/v1/comments/*` - Create, list, read, update, soft-delete comments
/// - `/api/v1/health`, `/api/v1/health/ready`, `/api/v1/health/live`
/// - `/metrics` - Prometheus
///
/// Runs on port 8082 unless `BLOG_SERVICE_PORT` says otherwise.
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if std::env::args().nth(1).as_deref() == Some("healthcheck") {
        return run_healthcheck(&config).await;
    }

    init_tracing();

    tracing::info!("Starting {} v{}", SERVICE_NAME, env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let mut db_cfg = DbConfig::from_env_with_url(SERVICE_NAME, &config.database.url)
        .map_err(anyhow::Error::msg)
        .context("Invalid database pool configuration")?;
    db_cfg.max_connections = config.database.max_connections;
    if db_cfg.min_connections > db_cfg.max_connections {
        tracing::warn!(
            min_connections = db_cfg.min_connections,
            max_connections = db_cfg.max_connections,
            "DB_MIN_CONNECTIONS exceeds DATABASE_MAX_CONNECTIONS, lowering minimum"
        );
        db_cfg.min_connections = db_cfg.max_connections;
    }
    db_cfg
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Invalid database pool configuration")?;
    db_cfg.log_config();

    let db_pool = create_pool(db_cfg)
        .await
        .context("Failed to create database pool")?;

    if config.database.run_migrations {
        run_migrations(&db_pool)
            .await
            .context("Failed to run database migrations")?;
    } else {
        tracing::info!("RUN_MIGRATIONS disabled, skipping schema migrations");
    }

    let store = Arc::new(PgStore::new(db_pool.clone()));
    let posts: Arc<dyn PostStore> = store.clone();
    let comments: Arc<dyn CommentStore> = store;

    let post_service = web::Data::new(PostService::new(posts.clone(), comments.clone()));
    let comment_service = web::Data::new(CommentService::new(posts, comments));
    let health_state = web::Data::new(HealthState::new(db_pool.clone()));

    let http_bind_address = config.app.bind_address();
    tracing::info!("Starting HTTP server at {}", http_bind_address);

    let cors_config = config.cors.clone();
    let server = HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in cors_config.origins() {
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(post_service.clone())
            .app_data(comment_service.clone())
            .app_data(health_state.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route(
                "/metrics",
                web::get().to(blog_service::metrics::serve_metrics),
            )
            // Health check endpoints
            .route("/api/v1/health", web::get().to(health_summary))
            .route("/api/v1/health/ready", web::get().to(readiness_summary))
            .route("/api/v1/health/live", web::get().to(liveness_check))
            .configure(handlers::configure)
    })
    .bind(&http_bind_address)
    .with_context(|| format!("Failed to bind {}", http_bind_address))?
    .workers(config.app.workers)
    .disable_signals()
    .run();

    let server_handle = server.handle();
    let mut server_task = actix_web::rt::spawn(server);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    tokio::select! {
        result = &mut server_task => {
            match result {
                Ok(Ok(())) => tracing::info!("HTTP server stopped"),
                Ok(Err(e)) => tracing::error!("HTTP server returned error: {}", e),
                Err(e) => tracing::error!("HTTP server task join error: {}", e),
            }
        }
        _ = &mut shutdown => {
            tracing::info!("Shutdown signal received");
            server_handle.stop(true).await;
            if let Err(e) = server_task.await {
                tracing::error!("HTTP server task join error: {}", e);
            }
        }
    }

    db_pool.close().await;
    tracing::info!("{} shut down", SERVICE_NAME);
    Ok(())
}
