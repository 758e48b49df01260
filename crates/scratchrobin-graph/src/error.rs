#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("graph already contains a node with id `{id}`")]
    DuplicateNode { id: String },
}

pub type Result<T> = std::result::Result<T, Error>;
