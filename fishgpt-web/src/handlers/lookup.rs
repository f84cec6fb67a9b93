use crate::handlers::notices;
use crate::models::{LookupForm, LookupResult};
use crate::services::image::image_url_for;
use crate::services::markdown;
use crate::services::prompt::{build_prompt, InfoMode};
use crate::services::AiClient;
use crate::AppState;
use askama::Template;
use axum::{
    extract::{rejection::FormRejection, State},
    response::IntoResponse,
    Form,
};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub peixe_nome: Option<String>,
    pub image_url: Option<String>,
    pub info_html: Option<String>,
    pub assistant_available: bool,
    pub current_page: &'static str,
}

impl IndexTemplate {
    fn new(result: LookupResult, assistant_available: bool) -> Self {
        Self {
            peixe_nome: result.species,
            image_url: result.image_url,
            info_html: result.info.as_deref().map(markdown::to_html),
            assistant_available,
            current_page: "lookup",
        }
    }
}

pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    IndexTemplate::new(LookupResult::default(), state.ai.is_available())
}

pub async fn lookup_handler(
    State(state): State<AppState>,
    form: Result<Form<LookupForm>, FormRejection>,
) -> impl IntoResponse {
    let form = form.map(|Form(form)| form).unwrap_or_else(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable lookup form, treated as empty");
        LookupForm::default()
    });
    let result = lookup_species(&state.ai, &form).await;
    IndexTemplate::new(result, state.ai.is_available())
}

/// Run one lookup. Without a species nothing is computed; with an unknown
/// action only the picture is resolved. Failures become the info text.
pub async fn lookup_species(ai: &AiClient, form: &LookupForm) -> LookupResult {
    let Some(species) = form.species() else {
        return LookupResult::default();
    };

    let image_url = image_url_for(species);

    let info = match form.action.as_deref().and_then(InfoMode::from_action) {
        Some(mode) => {
            tracing::info!(species = %species, mode = mode.as_str(), "Species lookup");
            let prompt = build_prompt(species, mode);
            Some(match ai.generate(&prompt).await {
                Ok(text) => text,
                Err(e) => notices::lookup_failure(&e),
            })
        }
        None => {
            tracing::debug!(species = %species, action = ?form.action, "Lookup without a known action");
            None
        }
    };

    LookupResult {
        species: Some(species.to_string()),
        image_url: Some(image_url),
        info,
    }
}
