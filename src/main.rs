use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use transport_attendance::config::environment::EnvironmentConfig;
use transport_attendance::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use transport_attendance::routes::create_api_router;
use transport_attendance::services::checkin_station::CheckinStation;
use transport_attendance::state::AppState;
use transport_attendance::store::{FirebaseClient, RealtimeStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚌 Registro de Asistencia - Transporte de Pasajeros");
    info!("===================================================");

    let config = EnvironmentConfig::default();

    // Cliente del store en tiempo real
    let store: Arc<dyn RealtimeStore> = Arc::new(FirebaseClient::new(
        config.firebase_database_url.clone(),
        config.firebase_auth_token.clone(),
    ));
    info!("🔗 Store en tiempo real: {}", config.firebase_database_url);

    // Estación de registro compartida (día de hoy, sin ruta seleccionada)
    let station = match CheckinStation::new(store.clone()).await {
        Ok(station) => {
            info!("✅ Estación de registro inicializada ({})", station.day());
            station
        }
        Err(e) => {
            error!("❌ Error inicializando la estación de registro: {}", e);
            return Err(anyhow::anyhow!("Error de estación: {}", e));
        }
    };

    let cors = if config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(&config.cors_origins)
    };

    let app_state = AppState::new(store, config.clone(), station);
    let app = create_api_router()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🧑 Roster de pasajeros:");
    info!("   GET    /api/passenger - Listar/buscar pasajeros");
    info!("   POST   /api/passenger - Crear pasajero");
    info!("   GET    /api/passenger/:id - Obtener pasajero");
    info!("   PUT    /api/passenger/:id - Actualizar pasajero");
    info!("   POST   /api/passenger/:id/toggle - Activar/desactivar");
    info!("   DELETE /api/passenger/:id - Eliminar pasajero");
    info!("🚌 Directorio de rutas:");
    info!("   GET  /api/trip - Rutas activas");
    info!("🎫 Estación de registro:");
    info!("   POST /api/checkin - Registrar asistencia por código");
    info!("   PUT  /api/checkin/trip - Seleccionar ruta de la estación");
    info!("   GET  /api/checkin/attendance - Lista en vivo del día");
    info!("   GET  /api/checkin/attendance/:day - Consulta por día");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
