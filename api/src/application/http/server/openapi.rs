use crate::application::http::{
    action::router::ActionApiDoc, flow::router::FlowApiDoc, health::router::HealthApiDoc,
    locale::router::LocaleApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "StyleBuddy API",
        description = "AI styling flows: outfit rating, style guides and hairstyle suggestions."
    ),
    nest(
        (path = "/actions", api = ActionApiDoc),
        (path = "/api", api = FlowApiDoc),
        (path = "/messages", api = LocaleApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
