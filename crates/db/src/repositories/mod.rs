//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod entity_repo;
pub mod game_repo;
pub mod game_score_repo;
pub mod game_variant_repo;
pub mod person_repo;
pub mod project_repo;
pub mod validation_record_repo;

pub use entity_repo::EntityRepo;
pub use game_repo::GameRepo;
pub use game_score_repo::GameScoreRepo;
pub use game_variant_repo::GameVariantRepo;
pub use person_repo::PersonRepo;
pub use project_repo::ProjectRepo;
pub use validation_record_repo::ValidationRecordRepo;
