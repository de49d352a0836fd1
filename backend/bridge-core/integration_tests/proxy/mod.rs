mod forward;
mod shutdown;
