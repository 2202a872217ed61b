use crate::commands::CmdResult;
use crate::error::Result;
use crate::remote::RemoteStore;

pub fn run<S: RemoteStore>(store: &S, id: &str) -> Result<CmdResult> {
    let detail = store.get_medicine(id)?;
    Ok(CmdResult::default().with_detail(detail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LeafletData, LeafletSection, MedicineDetail};
    use crate::remote::memory::InMemoryStore;

    #[test]
    fn returns_detail_with_leaflet() {
        let store = InMemoryStore::new();
        store.seed_medicine(MedicineDetail {
            id: "m1".into(),
            commercial_name: "Aspirin".into(),
            description: "Analgesic".into(),
            registry_code: "1.0001".into(),
            categories: vec!["analgesic".into()],
            leaflet_data: LeafletData {
                dosage: vec!["One tablet every 8 hours.".into()],
                ..Default::default()
            },
        });

        let detail = run(&store, "m1").unwrap().detail.unwrap();
        assert_eq!(detail.commercial_name, "Aspirin");
        assert_eq!(detail.leaflet_data.section(LeafletSection::Dosage), [
            "One tablet every 8 hours."
        ]);
        assert!(detail
            .leaflet_data
            .section(LeafletSection::Overdose)
            .is_empty());
    }

    #[test]
    fn unknown_id_is_an_error() {
        let store = InMemoryStore::new();
        assert!(run(&store, "missing").is_err());
    }
}
