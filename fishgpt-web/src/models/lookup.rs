use serde::Deserialize;

/// Form posted by the search page.
#[derive(Debug, Default, Deserialize)]
pub struct LookupForm {
    /// Species name, free text.
    pub peixe: Option<String>,
    /// `buscar_basico` or `buscar_detalhes`.
    pub action: Option<String>,
}

impl LookupForm {
    /// The species name, unless absent or blank. Passed on verbatim otherwise.
    pub fn species(&self) -> Option<&str> {
        self.peixe.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Outcome of one lookup; lives for a single request.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LookupResult {
    pub species: Option<String>,
    pub image_url: Option<String>,
    /// Model answer or error text, as Markdown.
    pub info: Option<String>,
}
