//! Server construction and wiring.
//!
//! Builds the Diesel-backed services, bundles them into the HTTP state, and
//! assembles the actix application. Swagger UI is mounted in debug builds
//! only.

mod config;

pub use config::Cli;

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::domain::ports::{
    ConnectionsCommand, ConnectionsQuery, ProfilesCommand, ProfilesQuery,
};
use backend::domain::{ConnectionService, ProfileService};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::{connections, health, profiles};
use backend::outbound::persistence::{
    DbPool, DieselConnectionRepository, DieselSkillRepository, DieselUserRepository,
    DieselUserSkillRepository,
};

/// Wire the Diesel adapters and domain services into the handler state.
pub fn build_state(pool: &DbPool) -> HttpState {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let user_skills = Arc::new(DieselUserSkillRepository::new(pool.clone()));
    let skills = Arc::new(DieselSkillRepository::new(pool.clone()));
    let ledger = Arc::new(DieselConnectionRepository::new(pool.clone()));

    let connection_service = Arc::new(ConnectionService::new(
        users.clone(),
        ledger.clone(),
        user_skills.clone(),
    ));
    let profile_service = Arc::new(ProfileService::new(users, user_skills, skills, ledger));

    let connections_command: Arc<dyn ConnectionsCommand> = connection_service.clone();
    let connections_query: Arc<dyn ConnectionsQuery> = connection_service;
    let profiles_query: Arc<dyn ProfilesQuery> = profile_service.clone();
    let profiles_command: Arc<dyn ProfilesCommand> = profile_service;

    HttpState {
        connections: connections_command,
        connections_query,
        profiles: profiles_query,
        profiles_command,
    }
}

/// Start the HTTP server on the given address.
pub fn run(bind_addr: SocketAddr, state: HttpState) -> std::io::Result<Server> {
    let state = web::Data::new(state);
    let server = HttpServer::new(move || {
        let api = web::scope("/api/v1")
            .service(profiles::search_profiles)
            .service(profiles::platform_stats)
            .service(profiles::own_profile)
            .service(profiles::update_profile)
            .service(profiles::update_skills)
            .service(profiles::get_profile)
            .service(connections::send_request)
            .service(connections::received_requests)
            .service(connections::sent_requests)
            .service(connections::accept_request)
            .service(connections::decline_request);

        let app = App::new()
            .app_data(state.clone())
            .service(health::health)
            .service(api);

        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );

        app
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}
