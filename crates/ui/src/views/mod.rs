mod worksheet;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use worksheet::{Selection, WorksheetView};
