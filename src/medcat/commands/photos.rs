use crate::commands::{CmdMessage, CmdResult};
use crate::error::{MedcatError, Result};
use crate::remote::RemoteStore;
use std::path::Path;

pub fn list<S: RemoteStore>(store: &S, id: &str) -> Result<CmdResult> {
    let photos = store.list_photos(id)?;
    let mut result = CmdResult::default();
    if photos.is_empty() {
        result.add_message(CmdMessage::info("No photos attached."));
    }
    Ok(result.with_photos(photos))
}

/// Upload a single file, then re-fetch the gallery. The re-fetch (rather
/// than a local insert) guarantees the listing reflects the
/// server-assigned url and key.
pub fn upload<S: RemoteStore>(store: &S, id: &str, file: &Path) -> Result<CmdResult> {
    if !file.is_file() {
        return Err(MedcatError::Api(format!(
            "not a file: {}",
            file.display()
        )));
    }

    store.upload_photo(id, file)?;
    let photos = store.list_photos(id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Photo uploaded."));
    Ok(result.with_photos(photos))
}

/// Delete one photo by its server key. Confirmation is the CLI's job;
/// commands only see the decision.
pub fn delete<S: RemoteStore>(store: &S, id: &str, key: &str, skip_confirm: bool) -> Result<CmdResult> {
    if !skip_confirm {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::warning("Deletion not confirmed; nothing done."));
        return Ok(result);
    }

    store.delete_photo(key)?;
    let photos = store.list_photos(id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Photo {} deleted.", key)));
    Ok(result.with_photos(photos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MedicineDetail, Photo};
    use crate::remote::memory::{InMemoryStore, Op};

    fn seeded() -> InMemoryStore {
        let store = InMemoryStore::new();
        store.seed_medicine(MedicineDetail {
            id: "m1".into(),
            commercial_name: "Aspirin".into(),
            description: String::new(),
            registry_code: "1.0001".into(),
            categories: Vec::new(),
            leaflet_data: Default::default(),
        });
        store
    }

    fn photo(url: &str, key: &str) -> Photo {
        Photo {
            url: url.to_string(),
            key: key.to_string(),
        }
    }

    #[test]
    fn lists_attached_photos() {
        let store = seeded();
        store.seed_photos("m1", vec![photo("http://x/a.jpg", "k1")]);
        let result = list(&store, "m1").unwrap();
        assert_eq!(result.photos.len(), 1);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn empty_gallery_gets_info_message() {
        let store = seeded();
        let result = list(&store, "m1").unwrap();
        assert!(result.photos.is_empty());
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn delete_by_key_removes_exactly_that_photo() {
        let store = seeded();
        // Two photos sharing a url: only the key distinguishes them.
        store.seed_photos(
            "m1",
            vec![photo("http://x/same.jpg", "k1"), photo("http://x/same.jpg", "k2")],
        );

        let result = delete(&store, "m1", "k1", true).unwrap();
        assert_eq!(result.photos.len(), 1);
        assert_eq!(result.photos[0].key, "k2");
    }

    #[test]
    fn delete_without_confirmation_is_a_noop() {
        let store = seeded();
        store.seed_photos("m1", vec![photo("http://x/a.jpg", "k1")]);

        delete(&store, "m1", "k1", false).unwrap();
        assert_eq!(store.list_photos("m1").unwrap().len(), 1);
    }

    #[test]
    fn upload_refetches_gallery() {
        let store = seeded();
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("box-front.jpg");
        std::fs::write(&file, b"jpeg bytes").unwrap();

        let result = upload(&store, "m1", &file).unwrap();
        // The photo shown is the one the server assigned, not a local guess.
        assert_eq!(result.photos.len(), 1);
        assert!(result.photos[0].key.starts_with("key-"));
    }

    #[test]
    fn upload_of_missing_file_fails_before_any_request() {
        let store = seeded();
        let result = upload(&store, "m1", Path::new("/no/such/file.jpg"));
        assert!(result.is_err());
        assert!(store.applied().is_empty());
    }

    #[test]
    fn delete_failure_leaves_gallery_alone() {
        let store = seeded();
        store.seed_photos("m1", vec![photo("http://x/a.jpg", "k1")]);
        store.fail_on(Op::DeletePhoto);

        assert!(delete(&store, "m1", "k1", true).is_err());
        assert_eq!(store.list_photos("m1").unwrap().len(), 1);
    }
}
