// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the interactive loop.
//
// Module responsibilities:
// - `client`: Encapsulates the HTTP exchange with the appeal classification
//   service and the typed error kinds a call can produce.
// - `format`: Pure rendering of a classification result (and the startup
//   banner) into terminal text blocks.
// - `ui`: The interactive prompt loop: sentinel commands, screen clearing,
//   and per-error-kind diagnostics.
//
// Keeping this separation makes the request logic and the formatting
// testable without a terminal or a live service.
pub mod client;
pub mod format;
pub mod ui;
