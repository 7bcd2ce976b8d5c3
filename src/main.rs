mod app;
mod audio;
mod config;
mod library;
mod player;
mod playlist;
mod runtime;
mod theme;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
