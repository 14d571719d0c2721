// Module layout (Clean Architecture style)
// - bootstrap: configuration, service registration and router assembly
// - infrastructure: Postgres and in-memory storage adapters
// - presentation: HTTP handlers and routing
// - application: ports and use cases
// - domain: core records

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
