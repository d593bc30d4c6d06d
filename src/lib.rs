//! HomeyTips is a terminal-first storefront with three small AI-assisted
//! planning tools (financial health check, savings timeline / trip planner,
//! and recipe suggestions).
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns configuration, the product/testimonial catalog, the
//!   checkout hand-off, and the advice adapter that talks to the
//!   generative-text endpoint.
//! - [`tools`] implements the three calculator widgets: local input state,
//!   a deterministic computation, and a prompt builder for the optional AI
//!   augmentation step.
//! - [`ui`] renders the terminal interface: the block formatter that turns
//!   a raw AI response into typed display blocks, the styled-line renderer,
//!   and the interactive shell that drives views and input.
//! - [`api`] defines the request/response payloads for the outbound
//!   generateContent call.
//!
//! The runtime entrypoint lives in the binary crate (`src/main.rs`), which
//! resolves configuration and the API credential, sets up the terminal, and
//! hands off to [`ui::shell`].

pub mod api;
pub mod core;
pub mod tools;
pub mod ui;
