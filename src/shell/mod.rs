// Composition root.
//
// - Read configuration from the environment.
// - Instantiate the in-memory adapters and wire them into the services.
// - Expose REST and GraphQL over one axum router.
// - Run the outbox relay that feeds the notification channel.

pub mod config;
pub mod graphql;
pub mod http;
pub mod state;
pub mod workers;
