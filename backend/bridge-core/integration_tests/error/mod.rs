mod launch;
mod proxy;
