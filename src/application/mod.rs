pub mod use_cases;

pub use use_cases::download_csv::DownloadCsvUseCase;
pub use use_cases::remove_duplicates::RemoveDuplicatesUseCase;
