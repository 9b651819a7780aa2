//! Repository implementations.

pub mod class;
pub mod seat;
pub mod student;

pub use class::ClassRepository;
pub use seat::SeatAssignmentRepository;
pub use student::StudentRepository;
