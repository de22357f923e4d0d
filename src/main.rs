// Entrypoint for the CLI application.
// - Keeps `main` small: create a classifier client and hand it to the loop.
// - Returns `anyhow::Result` to simplify error handling at the top level.

use classify_cli::{client::ClassifierClient, ui};

fn main() -> anyhow::Result<()> {
    // Create a client configured by the environment variable
    // `CLASSIFICATION_SERVICE_URL` or default to http://localhost:8000.
    let client = ClassifierClient::from_env()?;

    // Run the interactive loop. This call blocks until the user exits.
    ui::run(client)?;
    Ok(())
}
