use crate::commands::{CmdMessage, CmdResult};
use crate::error::{MedcatError, Result};
use crate::remote::RemoteStore;

/// Lookup by name. A blank term is rejected rather than silently falling
/// back to the paginated listing; the listing is its own command.
pub fn run<S: RemoteStore>(store: &S, term: &str) -> Result<CmdResult> {
    if term.trim().is_empty() {
        return Err(MedcatError::Api("search term cannot be empty".to_string()));
    }

    let medicines = store.search_medicines(term)?;

    let mut result = CmdResult::default();
    if medicines.is_empty() {
        result.add_message(CmdMessage::info(format!("No medicines match '{}'.", term)));
    }
    Ok(result.with_listed(medicines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MedicineDetail;
    use crate::remote::memory::InMemoryStore;

    fn store_with(names: &[&str]) -> InMemoryStore {
        let store = InMemoryStore::new();
        for (i, name) in names.iter().enumerate() {
            store.seed_medicine(MedicineDetail {
                id: format!("m{}", i),
                commercial_name: name.to_string(),
                description: String::new(),
                registry_code: format!("1.{:04}", i),
                categories: Vec::new(),
                leaflet_data: Default::default(),
            });
        }
        store
    }

    #[test]
    fn matches_by_name_fragment() {
        let store = store_with(&["Aspirin 500mg", "Dipyrone", "Aspirin Forte"]);
        let result = run(&store, "aspirin").unwrap();
        assert_eq!(result.listed.len(), 2);
    }

    #[test]
    fn search_results_carry_no_page_info() {
        let store = store_with(&["Aspirin"]);
        let result = run(&store, "aspirin").unwrap();
        assert!(result.page.is_none());
    }

    #[test]
    fn blank_term_is_rejected() {
        let store = store_with(&["Aspirin"]);
        assert!(run(&store, "   ").is_err());
    }

    #[test]
    fn no_matches_yields_info_message() {
        let store = store_with(&["Aspirin"]);
        let result = run(&store, "ibuprofen").unwrap();
        assert!(result.listed.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}
