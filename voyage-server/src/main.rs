use std::net::SocketAddr;
use std::path::PathBuf;

use voyage_server::network::load_network;
use voyage_server::web::{create_router, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let legs_path = PathBuf::from(args.next().unwrap_or_else(|| "Routes.txt".into()));
    let charges_path = PathBuf::from(args.next().unwrap_or_else(|| "PortCharges.txt".into()));

    let network = load_network(&legs_path, &charges_path);
    tracing::info!(
        ports = network.port_count(),
        legs = network.all_legs().count(),
        "Network loaded"
    );

    let app = create_router(AppState::new(network));

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
