mod source_docs_repository;
mod traits;

pub use source_docs_repository::SourceDocsRepository;
pub use traits::DocsRepository;
