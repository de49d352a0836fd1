mod coordinator;
mod signal;
