use crate::config::MedcatConfig;
use crate::model::{MedicineDetail, MedicineSummary, Photo};

pub mod config;
pub mod list;
pub mod login;
pub mod photos;
pub mod search;
pub mod update;
pub mod view;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Pagination facts for a listed page, derived client-side: the server
/// never declares whether more pages exist.
#[derive(Debug, Clone, Copy)]
pub struct PageInfo {
    pub page: usize,
    pub has_more: bool,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed: Vec<MedicineSummary>,
    pub detail: Option<MedicineDetail>,
    pub photos: Vec<Photo>,
    pub page: Option<PageInfo>,
    pub config: Option<MedcatConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed(mut self, medicines: Vec<MedicineSummary>) -> Self {
        self.listed = medicines;
        self
    }

    pub fn with_detail(mut self, detail: MedicineDetail) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn with_photos(mut self, photos: Vec<Photo>) -> Self {
        self.photos = photos;
        self
    }

    pub fn with_page(mut self, page: PageInfo) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_config(mut self, config: MedcatConfig) -> Self {
        self.config = Some(config);
        self
    }
}
