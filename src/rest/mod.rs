use serde::Serialize;

pub mod api;
pub mod errors;
pub mod page;
pub mod server;

mod swagger;

#[derive(Clone, Serialize)]
pub struct ListResult<T: Serialize> {
    pub total_records: usize,
    pub records: Vec<T>,
}

impl<T: Serialize> From<Vec<T>> for ListResult<T> {
    fn from(val: Vec<T>) -> Self {
        ListResult {
            total_records: val.len(),
            records: val,
        }
    }
}
