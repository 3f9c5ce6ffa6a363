mod app;
mod cli;
