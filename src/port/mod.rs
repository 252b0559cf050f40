//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the seams between the application services and the outside
//! world. Adapters implement them for real HTTP, LLM and file backends; tests
//! substitute scripted fakes.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  cache · retry · query  ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │  HTTP   │            │     LLM     │              │ Watchlist │
//! │ Adapter │            │   Adapter   │              │   Store   │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```

pub mod outbound;
