//! Conversation identity reveal and author presentation endpoints

use crate::core::disclosure::{ConversationId, UserIdentity};
use crate::server::extractors::AuthenticatedUser;
use crate::server::routes::ok;
use crate::server::state::AppState;
use crate::utils::error::{Result, TrustError};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Configure conversation and identity routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/conversations")
            .route("", web::post().to(open_conversation))
            .route("/{id}/identity", web::get().to(disclosure_view))
            .route("/{id}/identity/request", web::post().to(request_reveal))
            .route("/{id}/identity/respond", web::post().to(respond_reveal))
            .route("/{id}/messages", web::get().to(system_messages)),
    )
    .service(
        web::scope("/identity")
            .route("/revealed-peers", web::get().to(revealed_peers))
            .route("/present", web::post().to(present_authors)),
    );
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenConversationRequest {
    /// The caller's own identity
    pub participant: UserIdentity,
    pub counterpart: UserIdentity,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RespondRevealRequest {
    pub accept: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PresentAuthorsRequest {
    pub authors: Vec<UserIdentity>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RevealedPeersResponse {
    pub peers: Vec<Uuid>,
}

async fn open_conversation(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    request: web::Json<OpenConversationRequest>,
) -> Result<HttpResponse> {
    let OpenConversationRequest {
        participant,
        counterpart,
    } = request.into_inner();
    if participant.id != user.user_id {
        return Err(TrustError::validation(
            "participant must be the authenticated user",
        ));
    }

    let record = state
        .engine
        .open_conversation(&participant, &counterpart)
        .await?;
    Ok(ok(record))
}

async fn disclosure_view(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<ConversationId>,
) -> Result<HttpResponse> {
    let view = state
        .engine
        .disclosure_view(path.into_inner(), user.user_id)
        .await?;
    Ok(ok(view))
}

async fn request_reveal(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<ConversationId>,
) -> Result<HttpResponse> {
    let view = state
        .engine
        .request_reveal(path.into_inner(), user.user_id)
        .await?;
    Ok(ok(view))
}

async fn respond_reveal(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<ConversationId>,
    request: web::Json<RespondRevealRequest>,
) -> Result<HttpResponse> {
    let view = state
        .engine
        .respond_reveal(path.into_inner(), user.user_id, request.accept)
        .await?;
    Ok(ok(view))
}

async fn system_messages(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<ConversationId>,
) -> Result<HttpResponse> {
    let messages = state
        .engine
        .system_messages(path.into_inner(), user.user_id)
        .await?;
    Ok(ok(messages))
}

async fn revealed_peers(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let peers = state.engine.revealed_peer_set(user.user_id).await?;
    let mut peers: Vec<Uuid> = peers.iter().copied().collect();
    peers.sort();
    Ok(ok(RevealedPeersResponse { peers }))
}

async fn present_authors(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    request: web::Json<PresentAuthorsRequest>,
) -> Result<HttpResponse> {
    let context = state.engine.presentation_context(user.user_id).await?;
    Ok(ok(context.present_all(&request.authors)))
}
