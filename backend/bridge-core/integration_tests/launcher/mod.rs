mod arguments;
mod process;
