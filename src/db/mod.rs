pub mod user_repo;
pub use user_repo::UserRepository;
pub mod ranch_repo;
pub use ranch_repo::RanchRepository;
pub mod animal_repo;
pub use animal_repo::AnimalRepository;
pub mod station_repo;
pub use station_repo::StationRepository;
pub mod collar_repo;
pub use collar_repo::CollarRepository;
pub mod milk_repo;
pub use milk_repo::MilkRepository;
pub mod wellindex_repo;
pub use wellindex_repo::WellIndexRepository;
