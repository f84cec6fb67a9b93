//! Species picture lookup. Not a real search: one known species has a fixed
//! picture, everything else goes to a keyword image service.

const TUCUNARE_KEY: &str = "tucunaré";

const TUCUNARE_IMAGE_URL: &str = "https://upload.wikimedia.org/wikipedia/commons/thumb/1/14/Cichla_ocellaris_2.jpg/450px-Cichla_ocellaris_2.jpg";

/// Picture URL for a species. The name is embedded unescaped in the
/// fallback URL; callers rendering it into HTML must escape it.
pub fn image_url_for(species: &str) -> String {
    if species.to_lowercase().contains(TUCUNARE_KEY) {
        return TUCUNARE_IMAGE_URL.to_string();
    }

    format!("https://source.unsplash.com/400x300/?{},fishing", species)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tucunare_matches_case_insensitively() {
        assert_eq!(image_url_for("Tucunaré"), TUCUNARE_IMAGE_URL);
        assert_eq!(image_url_for("TUCUNARÉ AÇU"), TUCUNARE_IMAGE_URL);
        assert_eq!(image_url_for("pesca de tucunaré azul"), TUCUNARE_IMAGE_URL);
    }

    #[test]
    fn other_species_use_fallback_with_raw_name() {
        assert_eq!(
            image_url_for("Dourado"),
            "https://source.unsplash.com/400x300/?Dourado,fishing"
        );
        assert_eq!(
            image_url_for("pirarucu gigante"),
            "https://source.unsplash.com/400x300/?pirarucu gigante,fishing"
        );
    }

    #[test]
    fn unaccented_spelling_does_not_match() {
        assert_ne!(image_url_for("tucunare"), TUCUNARE_IMAGE_URL);
    }
}
