mod audio;
mod config;
mod library;
mod metadata;
mod playlist;
mod runtime;

fn main() -> anyhow::Result<()> {
    runtime::run()
}
