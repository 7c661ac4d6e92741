#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    // Set up logging; control verbosity with RUST_LOG
    env_logger::init();

    // Run the editor; file dialogs are spawned on this runtime
    tour_canvas::run_app()
}
