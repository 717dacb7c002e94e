use std::sync::Arc;

mod config;
mod handler;
mod logger;
mod response;
mod routes;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let state = Arc::new(config::AppState::new(&cfg));

    let server = server::Server::bind(addr, state)?;
    logger::log_server_start(&server.local_addr()?);

    // Ctrl+C stops the accept loop instead of killing the process mid-write
    let shutdown = server.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.shutdown();
        }
    });

    server.run().await?;
    logger::log_server_stopped();
    Ok(())
}
