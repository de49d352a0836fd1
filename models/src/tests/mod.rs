mod bridge_context;
mod network_address;
mod proxy_target;
