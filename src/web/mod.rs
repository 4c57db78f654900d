pub mod middleware;
pub mod routes;

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::state::AppState;
use routes::{address, auth, chat, complaints, contract, forum, likes, matches, notifications, profile, rent, reviews};

pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route(
            "/api/roommate_profile",
            get(profile::get_profile_handler).post(profile::save_profile_handler),
        )
        .route("/api/roommate_matches", post(matches::find_matches_handler))
        .route(
            "/api/liked_profiles",
            get(likes::list_likes_handler).post(likes::like_profile_handler),
        )
        .route(
            "/api/complaints",
            get(complaints::list_complaints_handler).post(complaints::submit_complaint_handler),
        )
        .route(
            "/api/reviews",
            get(reviews::list_reviews_handler).post(reviews::submit_review_handler),
        )
        .route(
            "/api/forum_posts",
            get(forum::list_posts_handler).post(forum::submit_post_handler),
        )
        .route(
            "/api/forum_posts/:post_id/replies",
            get(forum::list_replies_handler).post(forum::submit_reply_handler),
        )
        .route("/api/refine_text", post(contract::refine_text_handler))
        .route("/api/forum_idea", post(contract::forum_idea_handler))
        .route(
            "/api/analyze_contract",
            post(contract::analyze_contract_handler),
        )
        .route(
            "/api/check_rent_declaration",
            post(rent::check_declaration_handler),
        )
        .route("/api/chat/messages", post(chat::send_message_handler))
        .route(
            "/api/chat/messages/:peer_uid",
            get(chat::conversation_handler),
        )
        .route("/api/notifications", get(notifications::list_handler))
        .route(
            "/api/notifications/:id/read",
            post(notifications::mark_read_handler),
        )
        .layer(from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        // Public: usable without an account.
        .route("/api/check_auth", get(auth::check_auth_handler))
        .route("/api/predict_rent", post(rent::predict_rent_handler))
        .route(
            "/api/address_suggestions",
            post(address::suggestions_handler),
        )
        .merge(protected)
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CatchPanicLayer::new())
        .with_state(state)
}
