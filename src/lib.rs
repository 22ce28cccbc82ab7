//! Surge - configuration automation for a self-hosted media stack.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── configure     # Wire one service (or all enabled)
//! │   ├── status        # Connectivity checklist
//! │   ├── audit         # Security posture checklist
//! │   ├── wizard        # Setup-wizard HTTP backend
//! │   ├── monitor       # Sleep-and-repeat readiness daemon
//! │   ├── deploy        # docker compose up
//! │   └── completions   # Shell completions
//! ├── core/             # Shared library components
//! │   ├── env           # Environment / .env / surge.toml loader
//! │   ├── service       # Service descriptors
//! │   ├── poll          # Readiness poller
//! │   ├── discover      # API key discovery and generation
//! │   ├── render        # Config file generators (.env/json/yaml)
//! │   ├── http          # REST wiring client
//! │   ├── report        # Per-run step tally
//! │   ├── debrid        # Debrid token validation
//! │   └── docker        # docker compose invocation
//! └── services/         # One module per wired application
//! ```
//!
//! Each `configure` run is Loader -> Poller -> Discovery -> Generator/Wiring,
//! sequential and best-effort: failed steps are logged and tallied, never fatal.

pub mod cli;
pub mod core;
pub mod error;
pub mod services;
