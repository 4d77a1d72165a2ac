//! OpenAPI documentation assembly.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::register::register,
        crate::handlers::draft::get_draft,
        crate::handlers::draft::update_draft,
        crate::handlers::draft::stage_photo,
        crate::handlers::draft::cancel_draft,
        crate::handlers::draft::close_signal,
        crate::handlers::movies::create_movie,
        crate::handlers::movies::list_movies,
    ),
    components(schemas(
        cinelog_core::models::RegistrationRequest,
        cinelog_core::models::MovieDraft,
        cinelog_core::models::MovieResponse,
        crate::services::drafts::DraftUpdate,
        crate::services::drafts::DraftView,
        crate::error::ErrorResponse,
    )),
    tags(
        (name = "auth", description = "Account registration"),
        (name = "drafts", description = "Per-session movie draft state"),
        (name = "movies", description = "Shared movie catalog")
    )
)]
pub struct ApiDoc;
