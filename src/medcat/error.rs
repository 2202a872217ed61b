use thiserror::Error;

pub type Result<T> = std::result::Result<T, MedcatError>;

#[derive(Error, Debug)]
pub enum MedcatError {
    #[error("I/O error: {0}")]
    Io(std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(serde_json::Error),

    #[error("network error: {0}")]
    Network(reqwest::Error),

    /// The server answered with a non-success HTTP status.
    #[error("server returned {status} for {operation}")]
    Status { operation: &'static str, status: u16 },

    /// A field the client relies on was absent from a response body.
    #[error("response is missing expected field '{0}'")]
    MissingField(&'static str),

    #[error("medicine not found: {0}")]
    MedicineNotFound(String),

    #[error("not logged in. Run `medcat login <email>` first")]
    NotAuthenticated,

    #[error("{0}")]
    Api(String),
}
