pub mod clock;
pub mod entities;
pub mod repositories;
pub mod storage;
pub mod value_objects;
