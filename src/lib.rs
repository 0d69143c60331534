//! BuyerHQ directory scoring service.
//!
//! The heart of the crate is the agent scoring engine under
//! [`directory::agents::scoring`]: pure, deterministic functions that turn a
//! raw agent profile into presence tiers, an authority score, and the
//! buyer-facing BuyerHQ score. Everything around it (schema validation,
//! repository, service facade, HTTP router) exists so collaborators can feed
//! profiles in and read scored records back.

pub mod config;
pub mod directory;
pub mod error;
pub mod telemetry;
