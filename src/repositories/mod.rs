pub mod product_repository;
pub mod report_repository;
pub mod sale_repository;

// Re-export all repositories for convenient access
pub use product_repository::ProductRepository;
pub use report_repository::ReportRepository;
pub use sale_repository::SaleRepository;
