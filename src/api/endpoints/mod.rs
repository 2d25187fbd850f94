pub mod dosing;
pub mod genomics;
pub mod meta;
pub mod patients;
pub mod tables;

use serde::Deserialize;

/// Common `?limit=&offset=` query parameters shared by the list endpoints.
/// Clamping happens in the query engine, not here.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}
