pub mod gaming;
pub mod progress;
pub mod validation_record;
