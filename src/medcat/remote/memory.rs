use super::RemoteStore;
use crate::error::{MedcatError, Result};
use crate::model::{BasicFields, LeafletData, MedicineDetail, MedicineSummary, Photo};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Mutex;

/// Operations that can be told to fail, for exercising the error paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Authenticate,
    List,
    Search,
    Get,
    UpdateMedicine,
    UpdateLeaflet,
    ListPhotos,
    UploadPhoto,
    DeletePhoto,
}

/// Record of a mutation the fake server accepted, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    Basic(String, BasicFields),
    Leaflet(String, LeafletData),
    PhotoUploaded(String),
    PhotoDeleted(String),
}

struct Inner {
    token: String,
    medicines: Vec<MedicineDetail>,
    photos: HashMap<String, Vec<Photo>>,
    failing: HashSet<Op>,
    applied: Vec<Applied>,
    next_key: usize,
}

/// In-memory stand-in for the API server. Interior state sits behind a
/// mutex because the dual-request save hits the store from two threads.
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                token: "test-token".to_string(),
                medicines: Vec::new(),
                photos: HashMap::new(),
                failing: HashSet::new(),
                applied: Vec::new(),
                next_key: 1,
            }),
        }
    }

    pub fn seed_medicine(&self, medicine: MedicineDetail) {
        self.inner.lock().unwrap().medicines.push(medicine);
    }

    pub fn seed_photos(&self, id: &str, photos: Vec<Photo>) {
        self.inner
            .lock()
            .unwrap()
            .photos
            .insert(id.to_string(), photos);
    }

    pub fn fail_on(&self, op: Op) {
        self.inner.lock().unwrap().failing.insert(op);
    }

    pub fn applied(&self) -> Vec<Applied> {
        self.inner.lock().unwrap().applied.clone()
    }

    fn check(&self, op: Op, operation: &'static str) -> Result<()> {
        if self.inner.lock().unwrap().failing.contains(&op) {
            return Err(MedcatError::Status {
                operation,
                status: 500,
            });
        }
        Ok(())
    }

    fn summaries(medicines: &[MedicineDetail]) -> Vec<MedicineSummary> {
        medicines
            .iter()
            .map(|m| MedicineSummary {
                id: m.id.clone(),
                commercial_name: m.commercial_name.clone(),
                registry_code: m.registry_code.clone(),
                categories: m.categories.clone(),
            })
            .collect()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteStore for InMemoryStore {
    fn authenticate(&self, email: &str, _password: &str) -> Result<String> {
        self.check(Op::Authenticate, "authenticate")?;
        if email.is_empty() {
            return Err(MedcatError::MissingField("token"));
        }
        Ok(self.inner.lock().unwrap().token.clone())
    }

    fn list_medicines(&self, page: usize, page_size: usize) -> Result<Vec<MedicineSummary>> {
        self.check(Op::List, "list medicines")?;
        let inner = self.inner.lock().unwrap();
        let all = Self::summaries(&inner.medicines);
        let start = (page.saturating_sub(1)) * page_size;
        Ok(all.into_iter().skip(start).take(page_size).collect())
    }

    fn search_medicines(&self, name: &str) -> Result<Vec<MedicineSummary>> {
        self.check(Op::Search, "search medicines")?;
        let needle = name.to_lowercase();
        let inner = self.inner.lock().unwrap();
        Ok(Self::summaries(&inner.medicines)
            .into_iter()
            .filter(|m| m.commercial_name.to_lowercase().contains(&needle))
            .collect())
    }

    fn get_medicine(&self, id: &str) -> Result<MedicineDetail> {
        self.check(Op::Get, "get medicine")?;
        let inner = self.inner.lock().unwrap();
        inner
            .medicines
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| MedcatError::MedicineNotFound(id.to_string()))
    }

    fn update_medicine(&self, id: &str, fields: &BasicFields) -> Result<()> {
        self.check(Op::UpdateMedicine, "update medicine")?;
        let mut inner = self.inner.lock().unwrap();
        let medicine = inner
            .medicines
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| MedcatError::MedicineNotFound(id.to_string()))?;
        medicine.commercial_name = fields.commercial_name.clone();
        medicine.description = fields.description.clone();
        medicine.registry_code = fields.registry_code.clone();
        inner
            .applied
            .push(Applied::Basic(id.to_string(), fields.clone()));
        Ok(())
    }

    fn update_leaflet(&self, id: &str, leaflet: &LeafletData) -> Result<()> {
        self.check(Op::UpdateLeaflet, "update leaflet")?;
        let mut inner = self.inner.lock().unwrap();
        let medicine = inner
            .medicines
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| MedcatError::MedicineNotFound(id.to_string()))?;
        medicine.leaflet_data = leaflet.clone();
        inner
            .applied
            .push(Applied::Leaflet(id.to_string(), leaflet.clone()));
        Ok(())
    }

    fn list_photos(&self, id: &str) -> Result<Vec<Photo>> {
        self.check(Op::ListPhotos, "list photos")?;
        let inner = self.inner.lock().unwrap();
        Ok(inner.photos.get(id).cloned().unwrap_or_default())
    }

    fn upload_photo(&self, id: &str, file: &Path) -> Result<()> {
        self.check(Op::UploadPhoto, "upload photo")?;
        let mut inner = self.inner.lock().unwrap();
        let key = format!("key-{}", inner.next_key);
        inner.next_key += 1;
        let url = format!(
            "http://photos.local/{}",
            file.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default()
        );
        inner
            .photos
            .entry(id.to_string())
            .or_default()
            .push(Photo {
                url,
                key: key.clone(),
            });
        inner.applied.push(Applied::PhotoUploaded(key));
        Ok(())
    }

    fn delete_photo(&self, key: &str) -> Result<()> {
        self.check(Op::DeletePhoto, "delete photo")?;
        let mut inner = self.inner.lock().unwrap();
        let mut found = false;
        for photos in inner.photos.values_mut() {
            let before = photos.len();
            photos.retain(|p| p.key != key);
            found |= photos.len() != before;
        }
        if !found {
            return Err(MedcatError::Status {
                operation: "delete photo",
                status: 404,
            });
        }
        inner.applied.push(Applied::PhotoDeleted(key.to_string()));
        Ok(())
    }
}
