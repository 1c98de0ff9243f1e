pub mod tax_record_repository;

pub use tax_record_repository::TaxRecordRepository;
