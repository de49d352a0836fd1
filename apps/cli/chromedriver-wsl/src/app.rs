use crate::error::AppError;
use crate::logger::initialize as LoggerInitialize;

use bridge_core::config::BridgeConfig;
use bridge_core::launcher::{launch, rewrite_arguments};
use bridge_core::lifecycle::{LifecycleCoordinator, ShutdownReport, ShutdownSignal};
use bridge_core::network::resolve;
use bridge_core::proxy::{ForwardingProxy, ProxyServer, ShutdownTrigger};

use models::BridgeContextBuilder;

use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use std::sync::Arc;

use log::{info, warn};

/// Run the bridge until it shuts down.
///
/// Reads `chromedriver_wsl_config.json` from `config_dir` (the log file is written
/// there too), resolves the WSL addresses, launches the driver with rewritten
/// arguments and proxies `0.0.0.0:<listen port>` to it.
///
/// # Errors
///
/// Returns [`AppError::Startup`] for anything that prevents the bridge from
/// serving. Once serving, the bridge always ends with a [`ShutdownReport`].
pub async fn run<I, S>(config_dir: &Path, raw_args: I) -> Result<ShutdownReport, AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let config = BridgeConfig::load(config_dir);

    let level = config
        .as_ref()
        .ok()
        .and_then(BridgeConfig::log_level_filter);
    if let Err(e) = LoggerInitialize(config_dir, level) {
        eprintln!("{e}");
    }

    let config = config.map_err(|e| AppError::startup("Failed to load configuration", e))?;

    let addresses = resolve(&config.network_interface);
    if !addresses.is_resolved() {
        warn!(
            "Could not resolve addresses from {}",
            config.network_interface
        );
    }

    let context = BridgeContextBuilder::default()
        .with_driver_bin(&config.chromedriver_bin)
        .with_addresses(addresses)
        .with_host_ip(config.host_ip().map(str::to_string))
        .with_host_port(config.host_port().map(str::to_string))
        .build()
        .map_err(|e| AppError::startup("Failed to determine the driver address", e))?;

    let arguments = rewrite_arguments(
        raw_args,
        &context.host_port(),
        &context.addresses().local_address,
    )
    .map_err(|e| AppError::startup("Invalid driver arguments", e))?;

    let signal = ShutdownSignal::new();
    let proxy = ForwardingProxy::new(context.target().clone())
        .map_err(|e| AppError::startup("Failed to create proxy", e))?
        .with_observer(Arc::new(ShutdownTrigger::new(signal.clone())));

    let mut driver = launch(context.driver_bin(), &arguments)
        .map_err(|e| AppError::startup("Failed to launch chromedriver", e))?;

    let listen_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, arguments.listen_port()));
    let server = match ProxyServer::bind(listen_addr).await {
        Ok(server) => server,
        Err(e) => {
            if let Err(kill_error) = driver.kill().await {
                warn!("{kill_error}");
            }
            return Err(AppError::startup("Failed to start proxy", e));
        }
    };

    info!(
        "Bridging {} -> {} (driver PID: {:?})",
        server.local_addr(),
        context.target().authority(),
        driver.id()
    );

    let handle = server.serve(proxy, signal.clone());
    let report = LifecycleCoordinator::new(signal, Some(driver), handle)
        .run()
        .await;

    Ok(report)
}
