use crate::commands::{CmdMessage, CmdResult};
use crate::error::{MedcatError, Result};
use crate::model::MedicineDetail;
use crate::remote::RemoteStore;
use std::thread;

/// Commit buffered edits: the basic-fields patch and the leaflet patch go
/// out together and the save only succeeds once both have. Either failure
/// fails the whole save; there is no partial-success reporting and no
/// rollback of whatever the server already applied. The caller's detail
/// value is left untouched either way; retrying is the user's call.
pub fn run<S: RemoteStore>(store: &S, detail: &MedicineDetail) -> Result<CmdResult> {
    let basic = detail.basic_fields();

    let (basic_result, leaflet_result) = thread::scope(|scope| {
        let basic_handle = scope.spawn(|| store.update_medicine(&detail.id, &basic));
        let leaflet_handle = scope.spawn(|| store.update_leaflet(&detail.id, &detail.leaflet_data));
        (basic_handle.join(), leaflet_handle.join())
    });

    let join = |r: thread::Result<Result<()>>| {
        r.map_err(|_| MedcatError::Api("save worker panicked".to_string()))?
    };
    join(basic_result)?;
    join(leaflet_result)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Saved {}.",
        detail.commercial_name
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LeafletData, LeafletSection};
    use crate::remote::memory::{Applied, InMemoryStore, Op};

    fn seeded() -> (InMemoryStore, MedicineDetail) {
        let store = InMemoryStore::new();
        let detail = MedicineDetail {
            id: "m1".into(),
            commercial_name: "Aspirin".into(),
            description: "Analgesic".into(),
            registry_code: "1.0001".into(),
            categories: Vec::new(),
            leaflet_data: LeafletData::default(),
        };
        store.seed_medicine(detail.clone());
        (store, detail)
    }

    #[test]
    fn saves_both_patches() {
        let (store, mut detail) = seeded();
        detail.commercial_name = "Aspirin Forte".into();
        detail
            .leaflet_data
            .set_section(LeafletSection::Dosage, vec!["Two tablets.".into()]);

        run(&store, &detail).unwrap();

        let saved = store.get_medicine("m1").unwrap();
        assert_eq!(saved.commercial_name, "Aspirin Forte");
        assert_eq!(saved.leaflet_data.dosage, vec!["Two tablets."]);
        assert_eq!(store.applied().len(), 2);
    }

    #[test]
    fn leaflet_failure_fails_whole_save() {
        let (store, mut detail) = seeded();
        store.fail_on(Op::UpdateLeaflet);
        detail.commercial_name = "Renamed".into();

        let snapshot = detail.clone();
        assert!(run(&store, &detail).is_err());

        // Local form state is exactly as it was before the attempt.
        assert_eq!(detail, snapshot);
    }

    #[test]
    fn basic_failure_fails_whole_save_without_rollback() {
        let (store, mut detail) = seeded();
        store.fail_on(Op::UpdateMedicine);
        detail
            .leaflet_data
            .set_section(LeafletSection::Risks, vec!["Bleeding.".into()]);

        assert!(run(&store, &detail).is_err());

        // The leaflet patch may still have landed server-side; the save is
        // reported failed as a whole, with no rollback attempted.
        let applied = store.applied();
        assert!(applied.iter().all(|a| matches!(a, Applied::Leaflet(_, _))));
    }
}
