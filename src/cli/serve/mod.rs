//! Asset server command.

mod lifecycle;

use crate::{
    assets::AssetManager,
    config::AppConfig,
    core, debug,
    embed::serve::{SHELL_HTML, ShellVars},
    log,
    server::{AssetServer, respond_html, respond_not_found, respond_unavailable},
};
use anyhow::Result;
use crossbeam::channel;
use std::sync::Arc;
use tiny_http::{Request, Server};

/// Worker threads handling requests concurrently. Asset responses are
/// small; the pool mainly keeps one slow proxy round-trip from blocking
/// everything else.
const WORKER_THREADS: usize = 4;

/// Wire the asset subsystem for the configured environment and run the
/// request loop until shutdown.
pub fn serve(config: &AppConfig) -> Result<()> {
    // Strategy selection happens once, here. A corrupt manifest aborts
    // startup instead of serving broken asset URLs all day.
    let manager = Arc::new(AssetManager::from_config(config)?);
    let assets = Arc::new(AssetServer::from_config(config)?);

    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    let (shutdown_tx, _shutdown_rx) = channel::unbounded::<()>();
    core::register_server(Arc::clone(&server), shutdown_tx);

    log!("serve"; "http://{} ({})", addr, config.assets.environment);
    debug!("serve"; "asset routes: {}", assets.describe());

    run_request_loop(&server, manager, assets);
    Ok(())
}

fn run_request_loop(server: &Server, manager: Arc<AssetManager>, assets: Arc<AssetServer>) {
    // Use thread pool to handle requests concurrently
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(WORKER_THREADS)
        .build()
        .expect("failed to create thread pool");

    for request in server.incoming_requests() {
        let manager = Arc::clone(&manager);
        let assets = Arc::clone(&assets);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &manager, &assets) {
                log!("serve"; "request error: {e}");
            }
        });
    }
}

/// Handle a single HTTP request
fn handle_request(
    request: Request,
    manager: &AssetManager,
    assets: &AssetServer,
) -> Result<()> {
    // Early exit if shutdown requested
    if core::is_shutdown() {
        return respond_unavailable(request);
    }

    // Asset routes first: these are the registered prefix handlers
    if assets.handles(request.url()) {
        return assets.handle(request);
    }

    let url = request.url().to_string();
    let path = url.split('?').next().unwrap_or(&url);
    match path {
        "/" => respond_shell(request, manager),
        _ => respond_not_found(request),
    }
}

/// Render the application shell. This is the template-integration path:
/// the page asks the manager for URLs and embeds whatever comes back.
fn respond_shell(request: Request, manager: &AssetManager) -> Result<()> {
    let main_js = manager.asset_path("main.ts");
    let main_css = manager.asset_path("main.css");

    let body = SHELL_HTML.render(&ShellVars {
        main_js: &main_js,
        main_css: &main_css,
        version: env!("CARGO_PKG_VERSION"),
    });
    respond_html(request, 200, body)
}
