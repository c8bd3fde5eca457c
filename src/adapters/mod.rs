pub mod cache;
pub mod enrichment;
pub mod fs;
pub mod go;
pub mod test_detector;
