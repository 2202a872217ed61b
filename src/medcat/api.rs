//! # API Facade
//!
//! Thin facade over the command layer, the single entry point for any UI.
//! Generic over the remote port and the token store so the whole surface
//! runs against in-memory fakes in tests. No business logic lives here:
//! methods dispatch, nothing more.

use crate::browse::Fetch;
use crate::commands;
use crate::error::Result;
use crate::model::{MedicineDetail, MedicineSummary};
use crate::remote::RemoteStore;
use crate::session::TokenStore;
use std::path::Path;

pub struct MedcatApi<S: RemoteStore, T: TokenStore> {
    store: S,
    tokens: T,
}

impl<S: RemoteStore, T: TokenStore> MedcatApi<S, T> {
    pub fn new(store: S, tokens: T) -> Self {
        Self { store, tokens }
    }

    pub fn login(&self, email: &str, password: &str) -> Result<commands::CmdResult> {
        commands::login::login(&self.store, &self.tokens, email, password)
    }

    pub fn logout(&self) -> Result<commands::CmdResult> {
        commands::login::logout(&self.tokens)
    }

    pub fn list(&self, page: usize, page_size: usize) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, page, page_size)
    }

    pub fn search(&self, term: &str) -> Result<commands::CmdResult> {
        commands::search::run(&self.store, term)
    }

    pub fn view(&self, id: &str) -> Result<commands::CmdResult> {
        commands::view::run(&self.store, id)
    }

    pub fn save(&self, detail: &MedicineDetail) -> Result<commands::CmdResult> {
        commands::update::run(&self.store, detail)
    }

    pub fn photos(&self, id: &str) -> Result<commands::CmdResult> {
        commands::photos::list(&self.store, id)
    }

    pub fn upload_photo(&self, id: &str, file: &Path) -> Result<commands::CmdResult> {
        commands::photos::upload(&self.store, id, file)
    }

    pub fn delete_photo(&self, id: &str, key: &str, skip_confirm: bool) -> Result<commands::CmdResult> {
        commands::photos::delete(&self.store, id, key, skip_confirm)
    }

    /// Execute one fetch planned by the browse controller.
    pub fn fetch(&self, fetch: &Fetch) -> Result<Vec<MedicineSummary>> {
        match fetch {
            Fetch::Page { page, page_size } => self.store.list_medicines(*page, *page_size),
            Fetch::Search { name } => self.store.search_medicines(name),
        }
    }
}
