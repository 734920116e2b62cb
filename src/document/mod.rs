mod extractor;
mod fetcher;

pub use extractor::{PdfTextExtractor, TextExtractor};
pub use fetcher::{DocumentFetcher, HttpFetcher};
