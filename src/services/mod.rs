//! One module per wired application.
//!
//! Every module exposes `configure(&Env) -> Result<Report>` and follows the
//! same sequence: Loader -> Poller -> Discovery -> Generator/Wiring, with each
//! step recorded in the report and failures treated as non-fatal.

pub mod arr;
pub mod bazarr;
pub mod cinesync;
pub mod decypharr;
pub mod homepage;
pub mod kometa;
pub mod nzbget;
pub mod overseerr;
pub mod placeholdarr;
pub mod plex;
pub mod posterizarr;
pub mod prowlarr;
pub mod radarr;
pub mod rdt_client;
pub mod sonarr;
pub mod tautulli;
pub mod zurg;

use crate::core::env::Env;
use crate::core::report::Report;
use crate::core::service::ServiceKind;
use crate::error::Result;

/// Run one service's configuration script.
pub fn configure(kind: ServiceKind, env: &Env) -> Result<Report> {
    match kind {
        ServiceKind::Plex => plex::configure(env),
        ServiceKind::Radarr => radarr::configure(env),
        ServiceKind::Sonarr => sonarr::configure(env),
        ServiceKind::Prowlarr => prowlarr::configure(env),
        ServiceKind::Bazarr => bazarr::configure(env),
        ServiceKind::Overseerr => overseerr::configure(env),
        ServiceKind::Tautulli => tautulli::configure(env),
        ServiceKind::NzbGet => nzbget::configure(env),
        ServiceKind::RdtClient => rdt_client::configure(env),
        ServiceKind::Zurg => zurg::configure(env),
        ServiceKind::Decypharr => decypharr::configure(env),
        ServiceKind::CineSync => cinesync::configure(env),
        ServiceKind::Kometa => kometa::configure(env),
        ServiceKind::Posterizarr => posterizarr::configure(env),
        ServiceKind::Placeholdarr => placeholdarr::configure(env),
        ServiceKind::Homepage => homepage::configure(env),
    }
}
