// End-to-end integration tests for the PDF Audio Backend API
//
// Every test gets its own server bound to an ephemeral port, its own
// uploads/outputs/scratch directories and its own mock of the remote TTS
// service, so tests run in parallel without sharing state.
//
// Architecture:
// - The local engine is replaced by an in-process fake that writes a marker file
// - The networked engine is the real Google TTS repository pointed at wiremock
// - PDFs are generated on the fly with lopdf

mod helpers;
mod test_health;
