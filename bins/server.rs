use std::process::ExitCode;

use configs::AppConfig;
use dotenvy::dotenv;
use tokio::runtime::Runtime;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Identity attached to lifecycle events of this process.
#[derive(Clone, Copy)]
struct ProcessInfo {
    service_id: Uuid,
    pid: u32,
}

impl ProcessInfo {
    fn current() -> Self {
        Self { service_id: Uuid::new_v4(), pid: std::process::id() }
    }
}

fn install_panic_hook(process: ProcessInfo) {
    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "registry",
            event = "panic",
            service_id = %process.service_id,
            pid = process.pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));
}

fn build_runtime(worker_threads: Option<usize>) -> std::io::Result<Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads {
        builder.worker_threads(w);
    }
    builder.build()
}

async fn shutdown_signal(process: ProcessInfo) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // without a signal handler the server only stops on error
        warn!(service = "registry", event = "signal_unavailable", error = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(
        service = "registry",
        event = "shutdown_signal",
        service_id = %process.service_id,
        pid = process.pid,
        "received Ctrl+C, draining connections"
    );
}

fn main() -> ExitCode {
    dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let process = ProcessInfo::current();
    install_panic_hook(process);

    let cfg = match AppConfig::load_or_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "registry", event = "config_invalid", error = %format!("{e:#}"), "cannot load configuration");
            return ExitCode::FAILURE;
        }
    };

    let rt = match build_runtime(cfg.server.worker_threads) {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "registry", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "registry",
        event = "start",
        service_id = %process.service_id,
        pid = process.pid,
        version = env!("CARGO_PKG_VERSION"),
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "registry service starting"
    );

    match rt.block_on(server::run(cfg, shutdown_signal(process))) {
        Ok(()) => {
            info!(service = "registry", event = "stop", service_id = %process.service_id, pid = process.pid, "server stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "registry", event = "run_failed", error = %format!("{e:#}"), "server exited with error");
            ExitCode::FAILURE
        }
    }
}
