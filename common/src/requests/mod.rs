use serde::Deserialize;

#[derive(Deserialize)]
/// Request payload for the sign-in endpoint.
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
/// Query string of the report export endpoint.
pub struct ExportQuery {
    #[serde(default = "default_include_template_categories")]
    pub include_template_categories: bool,
}

fn default_include_template_categories() -> bool {
    true
}
