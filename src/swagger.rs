use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{ClubRole, MemberStatus, RedemptionStatus, TournamentStatus, TransactionType};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::club::list_clubs,
        handlers::club::create_club,
        handlers::club::join_club,
        handlers::member::list_members,
        handlers::member::award_points,
        handlers::member::change_role,
        handlers::member::deactivate_member,
        handlers::store::get_store,
        handlers::store::create_item,
        handlers::store::update_item,
        handlers::store::redeem_item,
        handlers::tournament::list_tournaments,
        handlers::tournament::create_tournament,
        handlers::transaction::get_transactions,
        handlers::assistant::chat,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            RefreshRequest,
            AuthResponse,
            UserResponse,
            CreateClubRequest,
            ClubResponse,
            ClubMembershipResponse,
            MemberResponse,
            MemberQuery,
            AwardPointsRequest,
            AwardPointsResponse,
            ChangeRoleRequest,
            StoreItemResponse,
            CreateStoreItemRequest,
            UpdateStoreItemRequest,
            StoreListResponse,
            RedeemResponse,
            RedemptionResponse,
            TournamentResponse,
            CreateTournamentRequest,
            BuyInResponse,
            TransactionResponse,
            TransactionQuery,
            ChatMessage,
            ChatRequest,
            ChatResponse,
            ToolInvocation,
            ClubRole,
            MemberStatus,
            TournamentStatus,
            TransactionType,
            RedemptionStatus,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication API"),
        (name = "club", description = "Club management API"),
        (name = "member", description = "Membership and points API"),
        (name = "store", description = "Points store API"),
        (name = "tournament", description = "Tournament API"),
        (name = "transaction", description = "Ledger API"),
        (name = "assistant", description = "AI assistant API"),
    ),
    info(
        title = "Poker Clubs Backend API",
        version = "1.0.0",
        description = "Poker club management REST API documentation",
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
