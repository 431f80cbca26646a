use crate::models::ProjectState;
use std::fmt;

pub const NO_LINK_TEXT: &str = "Aucun lien";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextElement {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkElement {
    pub text: String,
    pub href: String,
}

impl Default for LinkElement {
    fn default() -> Self {
        Self {
            text: NO_LINK_TEXT.to_string(),
            href: "#".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListElement {
    pub entries: Vec<String>,
}

/// The display elements a page has bound. `None` means the page has no such
/// element, and loading skips it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    pub count: Option<TextElement>,
    pub project_name: Option<TextElement>,
    pub project_link: Option<LinkElement>,
    pub history: Option<ListElement>,
}

impl View {
    pub fn full() -> Self {
        Self {
            count: Some(TextElement::default()),
            project_name: Some(TextElement::default()),
            project_link: Some(LinkElement::default()),
            history: Some(ListElement::default()),
        }
    }

    pub fn counter_only() -> Self {
        Self {
            count: Some(TextElement::default()),
            ..Self::default()
        }
    }

    /// Overwrites every bound element from `state`. History is rebuilt in
    /// full, newest entry first.
    pub fn reflect(&mut self, state: &ProjectState) {
        if let Some(count) = self.count.as_mut() {
            count.text = state.count.to_string();
        }
        if let Some(name) = self.project_name.as_mut() {
            name.text = state.project_name.clone();
        }
        if let Some(link) = self.project_link.as_mut() {
            match state.project_link.as_deref().filter(|link| !link.is_empty()) {
                Some(url) => {
                    link.text = url.to_string();
                    link.href = url.to_string();
                }
                None => *link = LinkElement::default(),
            }
        }
        if let Some(history) = self.history.as_mut() {
            history.entries.clear();
            history.entries.extend(state.history.iter().rev().cloned());
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.project_name {
            writeln!(f, "Projet : {}", name.text)?;
        }
        if let Some(link) = &self.project_link {
            writeln!(f, "Lien : {}", link.text)?;
        }
        if let Some(count) = &self.count {
            writeln!(f, "Compteur : {}", count.text)?;
        }
        if let Some(history) = &self.history {
            writeln!(f, "Historique :")?;
            for entry in &history.entries {
                writeln!(f, "  {entry}")?;
            }
        }
        Ok(())
    }
}
