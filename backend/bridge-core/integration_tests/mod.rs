mod config;
mod error;
mod helpers;
mod launcher;
mod lifecycle;
mod network;
mod proxy;
