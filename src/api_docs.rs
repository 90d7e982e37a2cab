use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::places::list_places,
        api::places::create_place,
        // Add other endpoints here as we document them
    ),
    tags(
        (name = "hbnb", description = "HBnB vacation-rental API")
    )
)]
pub struct ApiDoc;
