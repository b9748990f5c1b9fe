//! 路由组装与服务启动

use anyhow::{Context, Result};
use axum::{
    extract::Request,
    http::{Method, Uri},
    middleware,
    routing::{get, put},
    Router, ServiceExt,
};
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    normalize_path::NormalizePath,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::app::{
    docs,
    users::{handler, AppState, UserService},
};
use crate::config::Config;
use crate::core::{error::CoreError, middleware::request_logging_middleware};

/// 根据配置创建应用状态
pub fn build_state(config: &Config) -> AppState {
    AppState {
        user_service: UserService::from_config(&config.users),
    }
}

/// 完整的应用服务：路由外层去掉路径末尾的 `/`，`/users/` 与 `/users` 等价
pub type App = NormalizePath<Router>;

/// 组装应用
pub fn build_app(state: AppState, config: &Config) -> App {
    NormalizePath::trim_trailing_slash(build_router(state, config))
}

/// 组装路由
pub fn build_router(state: AppState, config: &Config) -> Router {
    let mut app = Router::new()
        .route("/users", get(handler::list_users).post(handler::create_user))
        .route("/users/:id", put(handler::update_user).delete(handler::delete_user));

    if config.docs.enabled {
        app = app.merge(docs::router(&config.docs.path));
    }

    app.fallback(route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.http.timeout_seconds,
                )))
                .layer(middleware::from_fn(request_logging_middleware)),
        )
        .with_state(state)
}

async fn route_not_found(method: Method, uri: Uri) -> CoreError {
    CoreError::NotFound(format!("Cannot {} {}", method, uri.path()))
}

/// 绑定端口并运行服务，直到收到退出信号
pub async fn run(config: Config) -> Result<()> {
    let addr = config.http.socket_addr()?;
    let state = build_state(&config);
    let app = build_app(state, &config);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("无法绑定到 {}", addr))?;

    info!("Server is running on port {}", config.http.port);
    info!("📖 API 端点:");
    info!("   GET    /users         - 获取所有用户");
    info!("   POST   /users         - 创建新用户");
    info!("   PUT    /users/:id     - 更新用户");
    info!("   DELETE /users/:id     - 删除用户");
    if config.docs.enabled {
        info!("   GET    {:<14} - API 文档", config.docs.path);
    }

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("服务运行失败")?;

    info!("服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("无法监听 Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("无法监听 SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("收到退出信号，正在关闭服务...");
}
