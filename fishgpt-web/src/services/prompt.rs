//! Prompt templates for species lookups.

/// Which kind of information a lookup asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoMode {
    /// Name, IUCN extinction status and Brazilian regulation.
    Basic,
    /// Fishing technique, season/weather, bait and equipment.
    Detailed,
}

impl InfoMode {
    /// Map the search form's action tag to a mode.
    pub fn from_action(action: &str) -> Option<Self> {
        match action {
            "buscar_basico" => Some(InfoMode::Basic),
            "buscar_detalhes" => Some(InfoMode::Detailed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InfoMode::Basic => "basic",
            InfoMode::Detailed => "detailed",
        }
    }

    fn instruction(&self) -> &'static str {
        match self {
            InfoMode::Basic => BASIC_INSTRUCTION,
            InfoMode::Detailed => DETAILED_INSTRUCTION,
        }
    }
}

const BASIC_INSTRUCTION: &str = "Forneça as informações BÁSICAS (NOME, STATUS DE EXTINÇÃO (IUCN), REGULAMENTAÇÃO (BR)) para o peixe.";

const DETAILED_INSTRUCTION: &str = "Forneça as informações DETALHADAS (VARIAÇÃO DE PESCA, MELHOR ÉPOCA/CLIMA, ISCA RECOMENDADA, VARAS/EQUIPAMENTO) de pesca para o peixe.";

const FORMAT_INSTRUCTION: &str =
    "Formate a resposta usando **Markdown** para ser exibida em HTML. Use títulos e negrito para clareza.";

/// Build the lookup prompt. The species name is embedded as given.
pub fn build_prompt(species: &str, mode: InfoMode) -> String {
    format!(
        "{} Nome do peixe: {}. {}",
        mode.instruction(),
        species,
        FORMAT_INSTRUCTION
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_prompt_asks_for_status_and_regulation() {
        let prompt = build_prompt("Tucunaré", InfoMode::Basic);
        assert!(prompt.contains("STATUS DE EXTINÇÃO (IUCN)"));
        assert!(prompt.contains("REGULAMENTAÇÃO (BR)"));
        assert!(prompt.contains("Nome do peixe: Tucunaré."));
        assert!(prompt.ends_with(FORMAT_INSTRUCTION));
    }

    #[test]
    fn detailed_prompt_asks_for_technique() {
        let prompt = build_prompt("Dourado", InfoMode::Detailed);
        assert!(prompt.contains("VARIAÇÃO DE PESCA"));
        assert!(prompt.contains("ISCA RECOMENDADA"));
        assert!(prompt.contains("Nome do peixe: Dourado."));
    }

    #[test]
    fn modes_do_not_share_key_phrases() {
        let basic = build_prompt("Pacu", InfoMode::Basic);
        let detailed = build_prompt("Pacu", InfoMode::Detailed);
        assert!(!basic.contains("VARIAÇÃO DE PESCA"));
        assert!(!detailed.contains("STATUS DE EXTINÇÃO"));
    }

    #[test]
    fn species_is_passed_verbatim() {
        let prompt = build_prompt("<b>??</b>", InfoMode::Basic);
        assert!(prompt.contains("Nome do peixe: <b>??</b>."));
    }

    #[test]
    fn action_tags_map_to_modes() {
        assert_eq!(InfoMode::from_action("buscar_basico"), Some(InfoMode::Basic));
        assert_eq!(
            InfoMode::from_action("buscar_detalhes"),
            Some(InfoMode::Detailed)
        );
        assert_eq!(InfoMode::from_action("outro"), None);
    }
}
