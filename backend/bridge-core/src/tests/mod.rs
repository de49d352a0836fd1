mod launcher;
mod proxy;
