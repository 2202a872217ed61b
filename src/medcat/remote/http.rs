use super::RemoteStore;
use crate::error::{MedcatError, Result};
use crate::model::{BasicFields, LeafletData, MedicineDetail, MedicineSummary, Photo};
use crate::session::Session;
use reqwest::blocking::multipart::Form;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Custom header carrying the session token on authenticated requests.
const TOKEN_HEADER: &str = "APIKEY";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Production remote over HTTP. One client instance per run; no retries,
/// no caching, every call is a fresh round trip.
pub struct HttpStore {
    session: Session,
    client: Client,
}

impl HttpStore {
    pub fn new(session: Session) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(MedcatError::Network)?;
        Ok(Self { session, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.session.api_url, path)
    }

    fn with_token(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.session.token {
            Some(token) => builder.header(TOKEN_HEADER, token),
            None => builder,
        }
    }

    fn send(&self, builder: RequestBuilder, operation: &'static str) -> Result<Response> {
        let response = builder.send().map_err(MedcatError::Network)?;
        let status = response.status();
        debug!(operation, status = status.as_u16(), "request completed");
        if !status.is_success() {
            return Err(MedcatError::Status {
                operation,
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

#[derive(Serialize)]
struct AuthRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct AuthResponse {
    token: Option<String>,
}

#[derive(Deserialize)]
struct MedicinesEnvelope {
    #[serde(default)]
    medicines: Vec<MedicineSummary>,
}

#[derive(Deserialize)]
struct MedicineEnvelope {
    medicine: MedicineDetail,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct UpdateRequest<'a, T: Serialize> {
    updated_fields: &'a T,
}

#[derive(Serialize)]
struct DeletePhotoRequest<'a> {
    key: &'a str,
}

/// The photo listing arrives either as a bare array or wrapped in an
/// object, depending on the server version. Both shapes are accepted.
#[derive(Deserialize)]
#[serde(untagged)]
enum PhotosEnvelope {
    Bare(Vec<Photo>),
    Wrapped {
        #[serde(default)]
        photos: Vec<Photo>,
    },
}

impl PhotosEnvelope {
    fn into_photos(self) -> Vec<Photo> {
        match self {
            PhotosEnvelope::Bare(photos) => photos,
            PhotosEnvelope::Wrapped { photos } => photos,
        }
    }
}

impl RemoteStore for HttpStore {
    fn authenticate(&self, email: &str, password: &str) -> Result<String> {
        let builder = self
            .client
            .patch(self.url("/users/auth"))
            .json(&AuthRequest { email, password });
        let response = self.send(builder, "authenticate")?;
        let body: AuthResponse = response.json().map_err(MedcatError::Network)?;
        body.token.ok_or(MedcatError::MissingField("token"))
    }

    fn list_medicines(&self, page: usize, page_size: usize) -> Result<Vec<MedicineSummary>> {
        debug!(page, page_size, "listing medicines");
        let builder = self.with_token(self.client.get(self.url(&format!(
            "/medicines?page={}&pageSize={}",
            page, page_size
        ))));
        let response = self.send(builder, "list medicines")?;
        let body: MedicinesEnvelope = response.json().map_err(MedcatError::Network)?;
        Ok(body.medicines)
    }

    fn search_medicines(&self, name: &str) -> Result<Vec<MedicineSummary>> {
        debug!(name, "searching medicines");
        let builder = self
            .with_token(self.client.patch(self.url("/medicines/search")))
            .json(&SearchRequest { name });
        let response = self.send(builder, "search medicines")?;
        let body: MedicinesEnvelope = response.json().map_err(MedcatError::Network)?;
        Ok(body.medicines)
    }

    fn get_medicine(&self, id: &str) -> Result<MedicineDetail> {
        let builder = self.with_token(self.client.get(self.url(&format!("/medicines/{}", id))));
        let response = self.send(builder, "get medicine")?;
        let body: MedicineEnvelope = response.json().map_err(MedcatError::Network)?;
        Ok(body.medicine)
    }

    fn update_medicine(&self, id: &str, fields: &BasicFields) -> Result<()> {
        let builder = self
            .with_token(self.client.patch(self.url(&format!("/medicines/{}", id))))
            .json(&UpdateRequest {
                updated_fields: fields,
            });
        self.send(builder, "update medicine")?;
        Ok(())
    }

    fn update_leaflet(&self, id: &str, leaflet: &LeafletData) -> Result<()> {
        let builder = self
            .with_token(
                self.client
                    .patch(self.url(&format!("/medicines/{}/leaflet", id))),
            )
            .json(&UpdateRequest {
                updated_fields: leaflet,
            });
        self.send(builder, "update leaflet")?;
        Ok(())
    }

    fn list_photos(&self, id: &str) -> Result<Vec<Photo>> {
        let builder = self.with_token(
            self.client
                .get(self.url(&format!("/medicines/{}/photos", id))),
        );
        let response = self.send(builder, "list photos")?;
        let body: PhotosEnvelope = response.json().map_err(MedcatError::Network)?;
        Ok(body.into_photos())
    }

    fn upload_photo(&self, id: &str, file: &Path) -> Result<()> {
        // multipart sets its own content type; the file part is named
        // "file" per the API contract
        let form = Form::new().file("file", file).map_err(MedcatError::Io)?;
        let builder = self
            .with_token(
                self.client
                    .post(self.url(&format!("/medicines/{}/photos", id))),
            )
            .multipart(form);
        self.send(builder, "upload photo")?;
        Ok(())
    }

    fn delete_photo(&self, key: &str) -> Result<()> {
        let builder = self
            .with_token(self.client.patch(self.url("/medicines/photos")))
            .json(&DeletePhotoRequest { key });
        self.send(builder, "delete photo")?;
        Ok(())
    }
}
