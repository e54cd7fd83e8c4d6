#![allow(dead_code, unused_imports)]

pub mod mock_docs_repository;

pub use mock_docs_repository::{MockDocsRepository, FIXTURE};
