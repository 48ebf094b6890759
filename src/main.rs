mod artwork;
mod config;
mod error;
mod metadata;
mod process;
mod render;
mod runtime;
mod tracker;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
