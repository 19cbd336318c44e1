fn main() -> Result<(), eframe::Error> {
    // Set up logging; RUST_LOG=debug shows layout commits and edit transitions
    env_logger::init();

    // Run the demo viewer
    parsegraph_block::run_app()
}
